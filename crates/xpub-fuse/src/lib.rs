//! Fusion of the cleaned export with the configuration documents, and
//! statistics extraction over the fused result.

pub mod fuse;
pub mod scan;
pub mod stats;

pub use fuse::{FusedDocument, fuse_documents};
pub use scan::well_formed;
pub use stats::extract_statistics;
