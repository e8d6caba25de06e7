//! Identity model: the principal a guard resolves for a request.

use serde::{Deserialize, Serialize};

/// Roles recognised by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved principal for a single request.
///
/// Fields are private so an identity cannot be altered once a guard has
/// placed it in the request extensions; replace it instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    id: String,
    role: Role,
}

impl Identity {
    /// Identifier used for identities resolved through the admin header.
    pub const HEADER_ADMIN_ID: &'static str = "admin-header";

    /// Build an identity. Returns `None` for an empty id.
    pub fn new(id: impl Into<String>, role: Role) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            return None;
        }
        Some(Self { id, role })
    }

    /// The fixed identity granted by a valid admin header.
    pub fn header_admin() -> Self {
        Self {
            id: Self::HEADER_ADMIN_ID.to_string(),
            role: Role::Admin,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Check if the identity holds the admin role.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
