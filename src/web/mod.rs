//! Role dashboards and the session gate guarding them.
//!
//! Page rendering lives in the frontend; the handlers here are placeholders
//! that report the identity the gate attached to the request.
//!
//! # Modules
//!
//! - [`gate`] - Pure routing rules (which path belongs to whom)
//! - [`handlers`] - Dashboard and login placeholders
//! - [`middleware`] - The gate as an Axum middleware
//! - [`routes`] - Dashboard route configuration

pub mod gate;
pub mod handlers;
pub mod middleware;
pub mod routes;
