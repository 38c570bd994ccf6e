//! Repository trait for user accounts and doctor profiles.

use crate::domain::entities::{DoctorProfile, NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for the credential store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by exact email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Finds a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    async fn phone_exists(&self, phone_number: &str) -> Result<bool, AppError>;

    /// Inserts the user and its role profile atomically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] carrying the violated constraint name
    /// when the email or phone number is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    /// Loads the doctor profile of `user_id`, if the user is a doctor.
    async fn find_doctor(&self, user_id: Uuid) -> Result<Option<DoctorProfile>, AppError>;

    /// Replaces the government-issued ID document reference.
    ///
    /// Returns `Ok(None)` when the user has no doctor profile.
    async fn update_doctor_document(
        &self,
        user_id: Uuid,
        document: String,
    ) -> Result<Option<DoctorProfile>, AppError>;

    /// Marks a doctor as approved, stamping `approved_at`.
    ///
    /// Returns `Ok(None)` when the user has no doctor profile.
    async fn approve_doctor(&self, user_id: Uuid) -> Result<Option<DoctorProfile>, AppError>;

    /// Doctors still waiting for approval, oldest registration first.
    async fn list_pending_doctors(&self) -> Result<Vec<(User, DoctorProfile)>, AppError>;

    /// Round-trips to the store. Used by the health check.
    async fn ping(&self) -> Result<(), AppError>;
}
