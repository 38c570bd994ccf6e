//! Doctor approval state and identity document management.

use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{DoctorProfile, User};
use crate::domain::repositories::UserRepository;
use crate::domain::session::SessionClaims;
use crate::error::AppError;

/// Service for doctor-specific account operations.
///
/// Approval is reported here but not enforced on navigation; dashboards
/// decide what an unapproved doctor may see.
pub struct DoctorService {
    users: Arc<dyn UserRepository>,
}

impl DoctorService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Returns whether the doctor with `user_id` has been approved.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user has no doctor profile.
    pub async fn approval_status(&self, user_id: Uuid) -> Result<bool, AppError> {
        self.users
            .find_doctor(user_id)
            .await?
            .map(|doctor| doctor.is_approved)
            .ok_or_else(doctor_not_found)
    }

    /// Replaces the government-issued ID document reference.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] unless `caller` is the doctor or an admin.
    /// Returns [`AppError::NotFound`] if the user has no doctor profile.
    pub async fn update_document(
        &self,
        caller: &SessionClaims,
        user_id: Uuid,
        document: String,
    ) -> Result<DoctorProfile, AppError> {
        if !caller.may_act_for(user_id) {
            return Err(AppError::forbidden(
                "Not allowed to update this doctor",
                json!({ "userId": user_id }),
            ));
        }

        self.users
            .update_doctor_document(user_id, document)
            .await?
            .ok_or_else(doctor_not_found)
    }

    /// Approves a doctor.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user has no doctor profile.
    pub async fn approve(&self, user_id: Uuid) -> Result<DoctorProfile, AppError> {
        let doctor = self
            .users
            .approve_doctor(user_id)
            .await?
            .ok_or_else(doctor_not_found)?;

        tracing::info!(user_id = %user_id, "Doctor approved");
        Ok(doctor)
    }

    /// Doctors awaiting approval.
    pub async fn pending(&self) -> Result<Vec<(User, DoctorProfile)>, AppError> {
        self.users.list_pending_doctors().await
    }
}

fn doctor_not_found() -> AppError {
    AppError::not_found("Doctor not found", Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Role, Specialization};
    use crate::domain::repositories::MockUserRepository;

    fn doctor(user_id: Uuid, approved: bool) -> DoctorProfile {
        DoctorProfile {
            user_id,
            specialization: Specialization::Cardiology,
            medical_license_number: "LIC-1".to_string(),
            years_of_experience: 7,
            qualifications: "MD".to_string(),
            government_issued_id_document: "doctor-documents/1_id.pdf".to_string(),
            is_approved: approved,
            approved_at: None,
        }
    }

    fn claims(user_id: Uuid, role: Role) -> SessionClaims {
        SessionClaims {
            user_id,
            email: "doc@b.com".to_string(),
            role,
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[tokio::test]
    async fn test_approval_status() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_find_doctor()
            .returning(move |user_id| Ok(Some(doctor(user_id, true))));

        let service = DoctorService::new(Arc::new(repo));

        assert!(service.approval_status(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_approval_status_not_a_doctor() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_doctor().returning(|_| Ok(None));

        let service = DoctorService::new(Arc::new(repo));
        let err = service.approval_status(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "Doctor not found");
    }

    #[tokio::test]
    async fn test_update_document_by_owner() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_update_doctor_document()
            .times(1)
            .returning(|user_id, document| {
                let mut d = doctor(user_id, false);
                d.government_issued_id_document = document;
                Ok(Some(d))
            });

        let service = DoctorService::new(Arc::new(repo));
        let updated = service
            .update_document(&claims(id, Role::Doctor), id, "new-doc".to_string())
            .await
            .unwrap();

        assert_eq!(updated.government_issued_id_document, "new-doc");
    }

    #[tokio::test]
    async fn test_update_document_by_stranger_forbidden() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_doctor_document().never();

        let service = DoctorService::new(Arc::new(repo));
        let err = service
            .update_document(
                &claims(Uuid::new_v4(), Role::Patient),
                Uuid::new_v4(),
                "doc".to_string(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_admin_may_update_any_doctor() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_doctor_document()
            .returning(|user_id, _| Ok(Some(doctor(user_id, false))));

        let service = DoctorService::new(Arc::new(repo));
        let target = Uuid::new_v4();
        let updated = service
            .update_document(&claims(Uuid::new_v4(), Role::Admin), target, "d".to_string())
            .await
            .unwrap();

        assert_eq!(updated.user_id, target);
    }

    #[tokio::test]
    async fn test_approve_missing_doctor() {
        let mut repo = MockUserRepository::new();
        repo.expect_approve_doctor().returning(|_| Ok(None));

        let service = DoctorService::new(Arc::new(repo));

        assert!(matches!(
            service.approve(Uuid::new_v4()).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }
}
