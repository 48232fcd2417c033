//! User model and RBAC roles.

use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use stockwise_core::{DomainError, UserId};

/// Role granted to a user. Authorization policy (which role may call which
/// endpoint) lives at the request layer; services stay role-agnostic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Storekeeper,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Storekeeper => "storekeeper",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "storekeeper" => Ok(Role::Storekeeper),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

/// Registered user. The password hash never leaves the backend; DTOs at the
/// API layer expose only id/email/role.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_known_names() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("storekeeper".parse::<Role>().unwrap(), Role::Storekeeper);
    }

    #[test]
    fn role_rejects_unknown_names() {
        assert!(matches!(
            "root".parse::<Role>(),
            Err(DomainError::Validation(_))
        ));
    }
}
