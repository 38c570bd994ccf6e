//! Browser-facing middleware.

pub mod session_gate;
