//! Handlers behind the browser routes.

mod dashboard;
mod login;

pub use dashboard::{DashboardView, dashboard_handler};
pub use login::login_handler;
