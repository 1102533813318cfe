//! Caller identity and roles.

use serde::{Deserialize, Serialize};

/// Access role resolved for a caller.
///
/// Closed set. There is no numeric hierarchy: a role only grants what a
/// route rule explicitly lists, so `Admin` is not implicitly a superset of
/// `Expert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Synthetic role for callers with no authenticated identity.
    Anonymous,
    User,
    Expert,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Anonymous => "anonymous",
            Role::User => "user",
            Role::Expert => "expert",
            Role::Admin => "admin",
        }
    }

    /// Dashboard landing page for the role.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Admin => "/dashboard/admin",
            Role::Expert => "/dashboard/expert",
            _ => "/dashboard/user",
        }
    }
}

/// The resolved caller for one request.
///
/// Never persisted by the gateway; lives only for the request it was
/// resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self {
            id: None,
            email: None,
            role: Role::Anonymous,
        }
    }

    pub fn authenticated(id: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: Some(id.into()),
            email: Some(email.into()),
            role,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.role == Role::Anonymous
    }

    /// Bucketing key for rate limiting: the user id when authenticated,
    /// otherwise the caller's network address.
    pub fn rate_limit_key(&self, peer_addr: &str) -> String {
        match &self.id {
            Some(id) if !self.is_anonymous() => format!("user:{id}"),
            _ => format!("ip:{peer_addr}"),
        }
    }
}
