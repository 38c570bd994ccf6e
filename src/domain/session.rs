//! Session claims carried inside the signed token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Role;

/// Claims of a session token.
///
/// Decoding is strict: a payload whose `userId` is not a UUID or whose `role`
/// is not one of the known roles fails deserialization and the whole token is
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    /// Issued at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl SessionClaims {
    /// True when the claims belong to `user_id` or to an administrator.
    pub fn may_act_for(&self, user_id: Uuid) -> bool {
        self.user_id == user_id || self.role == Role::Admin
    }
}
