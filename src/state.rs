//! Shared application state.

use std::sync::Arc;

use crate::application::services::{AuthService, DoctorService, DocumentService, TokenService};
use crate::domain::repositories::{DocumentRepository, UserRepository};
use crate::infrastructure::storage::DocumentStorage;
use crate::utils::signed_url::UrlSigner;

/// Secrets and lifetimes the services are built from.
#[derive(Clone)]
pub struct SecuritySettings {
    pub jwt_secret: String,
    pub token_ttl_seconds: i64,
    pub url_signing_secret: String,
    pub signed_url_ttl_seconds: i64,
    /// Adds the `Secure` attribute to the session cookie.
    pub cookie_secure: bool,
}

/// State injected into every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
    pub doctor_service: Arc<DoctorService>,
    pub document_service: Arc<DocumentService>,
    pub cookie_secure: bool,
}

impl AppState {
    /// Wires services on top of the given stores.
    pub fn new(
        users: Arc<dyn UserRepository>,
        documents: Arc<dyn DocumentRepository>,
        storage: Arc<dyn DocumentStorage>,
        security: SecuritySettings,
    ) -> Self {
        let token_service = Arc::new(TokenService::new(
            security.jwt_secret.as_bytes(),
            security.token_ttl_seconds,
        ));
        let signer = UrlSigner::new(
            security.url_signing_secret.into_bytes(),
            security.signed_url_ttl_seconds,
        );

        Self {
            auth_service: Arc::new(AuthService::new(users.clone(), token_service.clone())),
            doctor_service: Arc::new(DoctorService::new(users)),
            document_service: Arc::new(DocumentService::new(documents, storage, signer)),
            token_service,
            cookie_secure: security.cookie_secure,
        }
    }
}
