#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use wecare_gate::api::middleware::rate_limit::RateLimit;
use wecare_gate::application::services::TokenService;
use wecare_gate::domain::entities::{
    DoctorProfile, Document, Gender, NewAccount, NewDocument, NewDoctorProfile, NewProfile,
    NewUser, Role, Specialization, User,
};
use wecare_gate::domain::repositories::{DocumentRepository, UserRepository};
use wecare_gate::domain::session::SessionClaims;
use wecare_gate::error::AppError;
use wecare_gate::infrastructure::storage::MemoryDocumentStorage;
use wecare_gate::routes::app_router;
use wecare_gate::state::{AppState, SecuritySettings};
use wecare_gate::utils::db_error::{USERS_EMAIL_KEY, USERS_PHONE_NUMBER_KEY};
use wecare_gate::utils::password;

pub const JWT_SECRET: &str = "integration-test-jwt-secret-0123456789";
pub const PASSWORD: &str = "correct-horse-battery";

/// Credential store kept in memory, with the same uniqueness rules as the
/// `users` table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
    doctors: RwLock<HashMap<Uuid, DoctorProfile>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn phone_exists(&self, phone_number: &str) -> Result<bool, AppError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|u| u.phone_number == phone_number))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == new_user.account.email) {
            return Err(AppError::conflict(
                "Unique constraint violated",
                json!({ "constraint": USERS_EMAIL_KEY }),
            ));
        }
        if users
            .values()
            .any(|u| u.phone_number == new_user.account.phone_number)
        {
            return Err(AppError::conflict(
                "Unique constraint violated",
                json!({ "constraint": USERS_PHONE_NUMBER_KEY }),
            ));
        }

        let now = Utc::now();
        let account = new_user.account;
        let user = User {
            id: Uuid::new_v4(),
            email: account.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            first_name: account.first_name,
            last_name: account.last_name,
            date_of_birth: account.date_of_birth,
            phone_number: account.phone_number,
            gender: account.gender,
            address: account.address,
            created_at: now,
            updated_at: now,
        };

        if let Some(NewProfile::Doctor(profile)) = new_user.profile {
            self.doctors.write().await.insert(
                user.id,
                DoctorProfile {
                    user_id: user.id,
                    specialization: profile.specialization,
                    medical_license_number: profile.medical_license_number,
                    years_of_experience: profile.years_of_experience,
                    qualifications: profile.qualifications,
                    government_issued_id_document: profile.government_issued_id_document,
                    is_approved: false,
                    approved_at: None,
                },
            );
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_doctor(&self, user_id: Uuid) -> Result<Option<DoctorProfile>, AppError> {
        Ok(self.doctors.read().await.get(&user_id).cloned())
    }

    async fn update_doctor_document(
        &self,
        user_id: Uuid,
        document: String,
    ) -> Result<Option<DoctorProfile>, AppError> {
        Ok(self.doctors.write().await.get_mut(&user_id).map(|d| {
            d.government_issued_id_document = document;
            d.clone()
        }))
    }

    async fn approve_doctor(&self, user_id: Uuid) -> Result<Option<DoctorProfile>, AppError> {
        Ok(self.doctors.write().await.get_mut(&user_id).map(|d| {
            d.is_approved = true;
            d.approved_at = Some(Utc::now());
            d.clone()
        }))
    }

    async fn list_pending_doctors(&self) -> Result<Vec<(User, DoctorProfile)>, AppError> {
        let users = self.users.read().await;
        let mut pending: Vec<_> = self
            .doctors
            .read()
            .await
            .values()
            .filter(|d| !d.is_approved)
            .filter_map(|d| users.get(&d.user_id).map(|u| (u.clone(), d.clone())))
            .collect();
        pending.sort_by_key(|(u, _)| u.created_at);
        Ok(pending)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<HashMap<Uuid, Document>>,
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn create(&self, document: NewDocument) -> Result<Document, AppError> {
        let document = Document {
            id: Uuid::new_v4(),
            user_id: document.user_id,
            document_type: document.document_type,
            file_path: document.file_path,
            created_at: Utc::now(),
        };
        self.documents
            .write()
            .await
            .insert(document.id, document.clone());
        Ok(document)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, AppError> {
        Ok(self.documents.read().await.get(&id).cloned())
    }
}

/// Handles on the stores behind a test server.
pub struct TestApp {
    pub server: TestServer,
    pub users: Arc<InMemoryUserRepository>,
    pub documents: Arc<InMemoryDocumentRepository>,
    pub storage: Arc<MemoryDocumentStorage>,
    pub tokens: TokenService,
}

pub fn security() -> SecuritySettings {
    SecuritySettings {
        jwt_secret: JWT_SECRET.to_string(),
        token_ttl_seconds: 86_400,
        url_signing_secret: "integration-test-url-secret".to_string(),
        signed_url_ttl_seconds: 3_600,
        cookie_secure: false,
    }
}

pub fn create_test_state() -> (
    AppState,
    Arc<InMemoryUserRepository>,
    Arc<InMemoryDocumentRepository>,
    Arc<MemoryDocumentStorage>,
) {
    let users = Arc::new(InMemoryUserRepository::default());
    let documents = Arc::new(InMemoryDocumentRepository::default());
    let storage = Arc::new(MemoryDocumentStorage::new());

    let state = AppState::new(
        users.clone(),
        documents.clone(),
        storage.clone(),
        security(),
    );

    (state, users, documents, storage)
}

/// Full application router without rate limiting.
pub fn create_test_app() -> TestApp {
    let (state, users, documents, storage) = create_test_state();
    let server = TestServer::new(app_router(state, RateLimit::Disabled)).unwrap();

    TestApp {
        server,
        users,
        documents,
        storage,
        tokens: TokenService::new(JWT_SECRET.as_bytes(), 86_400),
    }
}

fn account(email: &str, phone_number: &str) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        phone_number: phone_number.to_string(),
        gender: Gender::Other,
        address: "1 Test Street".to_string(),
    }
}

/// Inserts a user whose password is [`PASSWORD`].
pub async fn create_test_user(
    users: &InMemoryUserRepository,
    email: &str,
    phone_number: &str,
    role: Role,
) -> User {
    let profile = match role {
        Role::Doctor => Some(NewProfile::Doctor(NewDoctorProfile {
            specialization: Specialization::Cardiology,
            medical_license_number: "LIC-0001".to_string(),
            years_of_experience: 7,
            qualifications: "MD".to_string(),
            government_issued_id_document: "doctor-documents/1_id.pdf".to_string(),
        })),
        _ => None,
    };

    users
        .create(NewUser {
            account: account(email, phone_number),
            password_hash: password::hash(PASSWORD).unwrap(),
            role,
            profile,
        })
        .await
        .unwrap()
}

pub fn token_for(app: &TestApp, user: &User) -> String {
    app.tokens.issue(user).unwrap()
}

/// Token for an arbitrary identity that does not need to exist in the store.
pub fn token_for_claims(app: &TestApp, role: Role, user_id: Uuid, exp_offset: i64) -> String {
    let now = Utc::now().timestamp();
    app.tokens
        .sign(&SessionClaims {
            user_id,
            email: "someone@example.com".to_string(),
            role,
            iat: now,
            exp: now + exp_offset,
        })
        .unwrap()
}

pub fn cookie_header(token: &str) -> String {
    format!("token={}", token)
}
