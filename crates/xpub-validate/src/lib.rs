//! Reference validation: the gate that decides whether the transformation
//! engine may run.

pub mod gate;
pub mod store;

pub use gate::{declared_references, required_references};
pub use store::{InMemoryRecordStore, RecordStore, XmlRecordStore};
