//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, password hashing, token issuing and
//! document storage. Handlers talk to these, never to repositories directly.
//!
//! # Available Services
//!
//! - [`services::token_service::TokenService`] - Session token issuing and verification
//! - [`services::auth_service::AuthService`] - Login, registration and admin creation
//! - [`services::doctor_service::DoctorService`] - Doctor approval and ID documents
//! - [`services::document_service::DocumentService`] - Uploads and signed downloads

pub mod services;
