//! Core domain entities.
//!
//! Entities are plain data structures. Creation inputs live next to the
//! entity they produce (`NewUser`, `NewDocument`).
//!
//! # Entity Types
//!
//! - [`User`] - Credential record with the common profile fields
//! - [`DoctorProfile`] - Doctor-specific profile with approval state
//! - [`Document`] - Reference to an uploaded file

pub mod document;
pub mod user;

pub use document::{Document, NewDocument};
pub use user::{
    DoctorProfile, Gender, NewAccount, NewDoctorProfile, NewPatientProfile, NewProfile, NewUser,
    Role, Specialization, UnknownVariant, User,
};
