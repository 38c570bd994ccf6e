//! Credential verification, registration and token issuing.

use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use crate::application::services::TokenService;
use crate::domain::entities::{NewAccount, NewProfile, NewUser, Role, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::db_error::{USERS_EMAIL_KEY, USERS_PHONE_NUMBER_KEY, violated_constraint};
use crate::utils::password::{self, PasswordError};

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// A verified user together with a freshly issued session token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
}

/// Service behind the login and registration endpoints.
///
/// Failed logins never reveal whether the email exists: an unknown email runs
/// a throwaway hash verification and returns the same error as a wrong
/// password.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Verifies credentials and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with [`INVALID_CREDENTIALS`] if the
    /// user does not exist or the password does not match.
    /// Returns [`AppError::Internal`] on store or hashing failures.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            let password = password.to_string();
            let _ = tokio::task::spawn_blocking(move || password::burn_verification(&password))
                .await;
            info!("Login rejected: unknown account");
            metrics::counter!("auth_logins_total", "outcome" => "rejected").increment(1);
            return Err(invalid_credentials());
        };

        let password = password.to_string();
        let stored = user.password_hash.clone();
        let verified = tokio::task::spawn_blocking(move || password::verify(&password, &stored))
            .await
            .map_err(|e| {
                AppError::internal(
                    "Password verification task failed",
                    json!({ "cause": e.to_string() }),
                )
            })?;

        match verified {
            Ok(true) => {}
            Ok(false) | Err(PasswordError::Empty) | Err(PasswordError::TooLong(_)) => {
                info!(user_id = %user.id, "Login rejected: password mismatch");
                metrics::counter!("auth_logins_total", "outcome" => "rejected").increment(1);
                return Err(invalid_credentials());
            }
            Err(e) => {
                return Err(AppError::internal(
                    "Stored password hash is unusable",
                    json!({ "user_id": user.id, "cause": e.to_string() }),
                ));
            }
        }

        let token = self.tokens.issue(&user)?;
        info!(user_id = %user.id, role = %user.role, "Login succeeded");
        metrics::counter!("auth_logins_total", "outcome" => "success").increment(1);

        Ok(LoginOutcome { user, token })
    }

    /// Registers a patient or doctor and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with `"Email already exists"` or
    /// `"Phone number already exists"` for duplicates, including duplicates
    /// detected by the store's unique constraints.
    /// Returns [`AppError::Internal`] on store or hashing failures.
    pub async fn register(
        &self,
        account: NewAccount,
        password: String,
        profile: NewProfile,
    ) -> Result<LoginOutcome, AppError> {
        if self.users.email_exists(&account.email).await? {
            return Err(email_taken());
        }
        if self.users.phone_exists(&account.phone_number).await? {
            return Err(phone_taken());
        }

        let role = profile.role();
        let user = self
            .create_user(NewUser {
                account,
                password_hash: hash_password(password).await?,
                role,
                profile: Some(profile),
            })
            .await?;

        let token = self.tokens.issue(&user)?;
        info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(LoginOutcome { user, token })
    }

    /// Creates an administrator account. Not reachable over HTTP.
    ///
    /// # Errors
    ///
    /// Same duplicate handling as [`AuthService::register`].
    pub async fn create_admin(
        &self,
        account: NewAccount,
        password: String,
    ) -> Result<User, AppError> {
        if self.users.email_exists(&account.email).await? {
            return Err(email_taken());
        }
        if self.users.phone_exists(&account.phone_number).await? {
            return Err(phone_taken());
        }

        let user = self
            .create_user(NewUser {
                account,
                password_hash: hash_password(password).await?,
                role: Role::Admin,
                profile: None,
            })
            .await?;

        info!(user_id = %user.id, "Administrator created");
        Ok(user)
    }

    /// Checks that the credential store answers.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.users.ping().await
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, AppError> {
        self.users
            .create(new_user)
            .await
            .map_err(|e| match violated_constraint(&e) {
                Some(USERS_EMAIL_KEY) => email_taken(),
                Some(USERS_PHONE_NUMBER_KEY) => phone_taken(),
                _ => e,
            })
    }
}

async fn hash_password(password: String) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || password::hash(&password))
        .await
        .map_err(|e| {
            AppError::internal("Password hashing task failed", json!({ "cause": e.to_string() }))
        })?;

    match hashed {
        Ok(hash) => Ok(hash),
        Err(e @ (PasswordError::Empty | PasswordError::TooLong(_))) => Err(AppError::bad_request(
            "Validation error",
            json!({ "password": [e.to_string()] }),
        )),
        Err(e) => Err(AppError::internal(
            "Password hashing failed",
            json!({ "cause": e.to_string() }),
        )),
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(INVALID_CREDENTIALS, Value::Null)
}

fn email_taken() -> AppError {
    AppError::bad_request("Email already exists", Value::Null)
}

fn phone_taken() -> AppError {
    AppError::bad_request("Phone number already exists", Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Gender, NewPatientProfile};
    use crate::domain::repositories::MockUserRepository;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    const SECRET: &[u8] = b"auth-service-test-secret-0123456789";

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(SECRET, 86_400))
    }

    fn stored_user(email: &str, password: &str, role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password::hash(password).unwrap(),
            role,
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 12, 9).unwrap(),
            phone_number: "5551234567".to_string(),
            gender: Gender::Female,
            address: "2 Navy Yard".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn account() -> NewAccount {
        NewAccount {
            email: "new@b.com".to_string(),
            first_name: "Alan".to_string(),
            last_name: "Turing".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1970, 6, 23).unwrap(),
            phone_number: "5559876543".to_string(),
            gender: Gender::Male,
            address: "Bletchley".to_string(),
        }
    }

    fn patient_profile() -> NewProfile {
        NewProfile::Patient(NewPatientProfile {
            emergency_contact_number: "5550000000".to_string(),
            emergency_contact_name: "Mum".to_string(),
            allergies: Some("pollen".to_string()),
            current_medications: None,
        })
    }

    #[tokio::test]
    async fn test_login_success_issues_matching_token() {
        let user = stored_user("a@b.com", "right-password", Role::Patient);
        let expected = user.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(1).returning(move |email| {
            assert_eq!(email, "a@b.com");
            Ok(Some(user.clone()))
        });

        let tokens = tokens();
        let service = AuthService::new(Arc::new(repo), tokens.clone());

        let outcome = service.login("a@b.com", "right-password").await.unwrap();
        let claims = tokens.verify(&outcome.token).unwrap();

        assert_eq!(outcome.user.id, expected.id);
        assert_eq!(claims.user_id, expected.id);
        assert_eq!(claims.role, Role::Patient);
        assert_eq!(claims.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = stored_user("a@b.com", "right-password", Role::Doctor);

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repo), tokens());
        let err = service.login("a@b.com", "wrong").await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
        assert_eq!(err.to_string(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_login_unknown_email_same_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repo), tokens());
        let err = service.login("nobody@b.com", "whatever").await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
        assert_eq!(err.to_string(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_login_store_failure_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = AuthService::new(Arc::new(repo), tokens());
        let err = service.login("a@b.com", "pw").await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_login_corrupt_hash_is_internal() {
        let mut user = stored_user("a@b.com", "pw-123456", Role::Patient);
        user.password_hash = "not-a-phc-string".to_string();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repo), tokens());
        let err = service.login("a@b.com", "pw-123456").await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_register_patient() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_phone_exists().returning(|_| Ok(false));
        repo.expect_create()
            .withf(|new_user| {
                new_user.role == Role::Patient
                    && new_user.password_hash.starts_with("$argon2id$")
                    && matches!(new_user.profile, Some(NewProfile::Patient(_)))
            })
            .times(1)
            .returning(|new_user| {
                let mut user = stored_user(&new_user.account.email, "unused-pass", new_user.role);
                user.password_hash = new_user.password_hash;
                Ok(user)
            });

        let tokens = tokens();
        let service = AuthService::new(Arc::new(repo), tokens.clone());

        let outcome = service
            .register(account(), "long-enough".to_string(), patient_profile())
            .await
            .unwrap();

        assert_eq!(outcome.user.role, Role::Patient);
        assert!(password::verify("long-enough", &outcome.user.password_hash).unwrap());
        assert_eq!(tokens.verify(&outcome.token).unwrap().user_id, outcome.user.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(true));
        repo.expect_create().never();

        let service = AuthService::new(Arc::new(repo), tokens());
        let err = service
            .register(account(), "long-enough".to_string(), patient_profile())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "Email already exists");
    }

    #[tokio::test]
    async fn test_register_duplicate_phone() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_phone_exists().returning(|_| Ok(true));
        repo.expect_create().never();

        let service = AuthService::new(Arc::new(repo), tokens());
        let err = service
            .register(account(), "long-enough".to_string(), patient_profile())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Phone number already exists");
    }

    #[tokio::test]
    async fn test_register_race_on_unique_constraint() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_phone_exists().returning(|_| Ok(false));
        repo.expect_create().returning(|_| {
            Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": USERS_EMAIL_KEY }),
            ))
        });

        let service = AuthService::new(Arc::new(repo), tokens());
        let err = service
            .register(account(), "long-enough".to_string(), patient_profile())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "Email already exists");
    }

    #[tokio::test]
    async fn test_create_admin_has_no_profile() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| Ok(false));
        repo.expect_phone_exists().returning(|_| Ok(false));
        repo.expect_create()
            .withf(|new_user| new_user.role == Role::Admin && new_user.profile.is_none())
            .times(1)
            .returning(|new_user| Ok(stored_user(&new_user.account.email, "x-unused", Role::Admin)));

        let service = AuthService::new(Arc::new(repo), tokens());
        let user = service
            .create_admin(account(), "admin-password".to_string())
            .await
            .unwrap();

        assert_eq!(user.role, Role::Admin);
    }
}
