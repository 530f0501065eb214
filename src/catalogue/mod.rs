//! The catalogue loader: parses a declarative YAML/JSON document into an
//! in-memory [`crate::model::KnowledgeGraph`], validating every name and
//! literal along the way.

pub mod document;
pub mod literal;
pub mod loader;

pub use document::RawCatalogue;
pub use loader::{load, load_str};
