//! Business logic services for the application layer.

pub mod auth_service;
pub mod doctor_service;
pub mod document_service;
pub mod token_service;

pub use auth_service::{AuthService, LoginOutcome};
pub use doctor_service::DoctorService;
pub use document_service::DocumentService;
pub use token_service::TokenService;
