//! Role-to-path routing rules of the session gate.
//!
//! Everything here is pure: given the request path, query string and the
//! verified claims (if any), [`decide`] returns where the request goes. The
//! middleware in [`crate::web::middleware::session_gate`] only does I/O around
//! it.

use uuid::Uuid;

use crate::domain::entities::Role;
use crate::domain::session::SessionClaims;

/// Where unauthenticated requests are sent.
pub const LOGIN_PATH: &str = "/login";

pub const PATIENT_TREE: &str = "/dashboard";
pub const DOCTOR_TREE: &str = "/doctor-dashboard";
pub const ADMIN_TREE: &str = "/admin-dashboard";

/// Generic protected tree owned by no role.
pub const API_TREE: &str = "/apis";

/// Every path tree the gate guards.
pub const PROTECTED_TREES: [&str; 4] = [PATIENT_TREE, ADMIN_TREE, DOCTOR_TREE, API_TREE];

/// Outcome of the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// No usable session: go to [`LOGIN_PATH`].
    Login,
    /// Valid session on a non-canonical path: go to this URL instead.
    Redirect(String),
    /// Valid session on the caller's own canonical path.
    PassThrough,
}

/// Dashboard tree owned by `role`.
pub fn owned_tree(role: Role) -> &'static str {
    match role {
        Role::Patient => PATIENT_TREE,
        Role::Doctor => DOCTOR_TREE,
        Role::Admin => ADMIN_TREE,
    }
}

/// Canonical landing path of a user: `<owned tree>/<user id>`.
pub fn home_path(role: Role, user_id: Uuid) -> String {
    format!("{}/{}", owned_tree(role), user_id)
}

/// Returns what follows `tree` in `path`, if `path` lies inside it.
///
/// Matching is per segment: `/dashboard` and `/dashboard/x` are inside
/// `/dashboard`, `/dashboardx` is not. The returned remainder has no leading
/// slash and is empty for the tree root.
pub fn strip_tree<'a>(path: &'a str, tree: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(tree)?;

    if rest.is_empty() {
        Some("")
    } else {
        rest.strip_prefix('/')
    }
}

/// True if `path` lies inside any guarded tree.
pub fn is_protected(path: &str) -> bool {
    PROTECTED_TREES
        .iter()
        .any(|tree| strip_tree(path, tree).is_some())
}

/// Decides the fate of a request to `path`.
///
/// `claims` is `None` when the token was absent or failed verification.
pub fn decide(path: &str, query: Option<&str>, claims: Option<&SessionClaims>) -> GateDecision {
    let Some(claims) = claims else {
        return GateDecision::Login;
    };

    let tree = owned_tree(claims.role);
    let user_id = claims.user_id.to_string();

    let Some(remainder) = strip_tree(path, tree) else {
        return GateDecision::Redirect(format!("{tree}/{user_id}"));
    };

    let first = remainder.split('/').next().unwrap_or_default();
    if Uuid::parse_str(first).is_ok_and(|id| id == claims.user_id) {
        return GateDecision::PassThrough;
    }

    let mut target = format!("{tree}/{user_id}");
    if !remainder.is_empty() {
        target.push('/');
        target.push_str(remainder);
    }
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }

    GateDecision::Redirect(target)
}
