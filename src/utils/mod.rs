//! Utility functions shared across layers.
//!
//! - [`password`] - Argon2 password hashing and verification
//! - [`signed_url`] - HMAC-signed, time-limited download links
//! - [`db_error`] - Constraint-name helpers for SQLx errors

pub mod db_error;
pub mod password;
pub mod signed_url;
