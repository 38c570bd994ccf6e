//! Object storage for uploaded documents.
//!
//! Provides a [`DocumentStorage`] trait with two implementations:
//! - [`LocalDocumentStorage`] - Files under a configured directory
//! - [`MemoryDocumentStorage`] - In-process map for testing

mod local;
mod memory;
mod service;

pub use local::LocalDocumentStorage;
pub use memory::MemoryDocumentStorage;
pub use service::{DocumentStorage, StorageError, StorageResult, validate_key};

#[cfg(test)]
pub use service::MockDocumentStorage;
