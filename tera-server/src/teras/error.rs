//! Data source error types.

use std::path::PathBuf;

/// Errors that can occur while loading teras and routes.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The dataset file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is not valid JSON or has the wrong shape
    #[error("invalid dataset in {}: {message}", path.display())]
    Json { path: PathBuf, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SourceError::Json {
            path: PathBuf::from("data/teras.json"),
            message: "expected value at line 1 column 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid dataset in data/teras.json: expected value at line 1 column 1"
        );

        let err = SourceError::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to read missing.json: not found");
    }
}
