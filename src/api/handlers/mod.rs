//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod doctor;
pub mod files;
pub mod health;

pub use auth::{login_handler, logout_handler, register_handler, session_handler};
pub use doctor::{approval_status_handler, update_document_handler};
pub use files::{download_handler, public_upload_handler, retrieve_handler, upload_handler};
pub use health::health_handler;
