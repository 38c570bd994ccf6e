use crate::error::AppError;

/// Unique constraint on `users.email`.
pub const USERS_EMAIL_KEY: &str = "users_email_key";
/// Unique constraint on `users.phone_number`.
pub const USERS_PHONE_NUMBER_KEY: &str = "users_phone_number_key";

/// Name of the unique constraint behind a [`AppError::Conflict`], if any.
pub fn violated_constraint(e: &AppError) -> Option<&str> {
    let AppError::Conflict { details, .. } = e else {
        return None;
    };

    details.get("constraint").and_then(|c| c.as_str())
}
