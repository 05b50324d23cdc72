//! Search configuration for the route finder.

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Maximum number of fewest-stop paths reconstructed per query.
    /// Dense graphs can have exponentially many; the rest are ignored.
    pub max_stop_paths: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_stop_paths: usize) -> Self {
        Self { max_stop_paths }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_stop_paths: 50 }
    }
}
