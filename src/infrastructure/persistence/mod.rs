//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Accounts, patient and doctor profiles
//! - [`PgDocumentRepository`] - Uploaded document references

pub mod pg_document_repository;
pub mod pg_user_repository;

pub use pg_document_repository::PgDocumentRepository;
pub use pg_user_repository::PgUserRepository;
