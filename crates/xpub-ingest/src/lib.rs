//! Ingestion of export and configuration documents: reading, encoding
//! detection and pre-parse cleaning.

pub mod clean;
pub mod slots;
pub mod source;

pub use clean::clean_document;
pub use slots::slot_paths;
pub use source::{declared_encoding, read_source_document};
