//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access and are implemented by concrete
//! repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Accounts, profiles and doctor approval
//! - [`DocumentRepository`] - Uploaded document references

pub mod document_repository;
pub mod user_repository;

pub use document_repository::DocumentRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use document_repository::MockDocumentRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
