//! Tera records: loading them from the data layer and looking them up.
//!
//! The route finder itself only deals in ids; this module supplies the
//! records the graph is built from and the name ↔ id mapping used at the
//! HTTP boundary.

mod directory;
mod error;
mod source;

pub use directory::{TeraDirectory, TeraSummary};
pub use error::SourceError;
pub use source::{Dataset, InMemorySource, JsonFileSource, TeraSource};
