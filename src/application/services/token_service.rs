//! Session token issuing and verification.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Value, json};

use crate::domain::entities::User;
use crate::domain::session::SessionClaims;
use crate::error::AppError;

/// Default token lifetime: one day.
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 86_400;

/// Issues and verifies HS256-signed session tokens.
///
/// Verification is stateless: every call recomputes the signature from the
/// token bytes, so no server-side session store exists. A token is accepted
/// only if the signature matches, `exp` has not passed (no leeway) and the
/// payload decodes into [`SessionClaims`].
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl TokenService {
    /// Creates a token service.
    ///
    /// # Arguments
    ///
    /// - `secret` - HMAC key shared by issuer and verifier
    /// - `ttl_seconds` - lifetime written into `exp` on issue
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds,
        }
    }

    /// Lifetime of issued tokens, also used as the cookie `Max-Age`.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Builds the claims for `user` as of now.
    pub fn claims_for(&self, user: &User) -> SessionClaims {
        let now = Utc::now().timestamp();
        SessionClaims {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now,
            exp: now + self.ttl_seconds,
        }
    }

    /// Issues a token for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        self.sign(&self.claims_for(user))
    }

    /// Signs arbitrary claims as-is.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn sign(&self, claims: &SessionClaims) -> Result<String, AppError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(
            |e| AppError::internal("Failed to sign session token", json!({ "cause": e.to_string() })),
        )
    }

    /// Verifies a token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for any bad signature, expired or
    /// malformed token. The reason is not exposed to the caller.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AppError> {
        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(reason = %e, "Session token rejected");
                AppError::unauthorized("Invalid token", Value::Null)
            })
    }
}
