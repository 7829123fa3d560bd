use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// Closed set of roles a user may hold.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "user_role", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Validator,
    Admin,
}

/// Roles allowed to review completions and read every rendered document.
pub const REVIEWER_ROLES: &[Role] = &[Role::Validator, Role::Admin];

/// Roles allowed to manage formats and users.
pub const ADMIN_ROLES: &[Role] = &[Role::Admin];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Validator => "validator",
            Role::Admin => "admin",
        }
    }

    pub fn is_any_of(self, roles: &[Role]) -> bool {
        has_capability(roles, self)
    }
}

/// The single capability check consulted at the entry of every operation.
pub fn has_capability(required: &[Role], role: Role) -> bool {
    required.contains(&role)
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "validator" => Ok(Role::Validator),
            "admin" => Ok(Role::Admin),
            other => Err(ApiError::InvalidInput(format!("unknown role '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_check() {
        assert!(has_capability(REVIEWER_ROLES, Role::Validator));
        assert!(has_capability(REVIEWER_ROLES, Role::Admin));
        assert!(!has_capability(REVIEWER_ROLES, Role::User));
        assert!(Role::Admin.is_any_of(ADMIN_ROLES));
        assert!(!Role::Validator.is_any_of(ADMIN_ROLES));
    }

    #[test]
    fn test_parse_role() {
        assert_eq!("Validator".parse::<Role>().unwrap(), Role::Validator);
        assert_eq!(" admin ".parse::<Role>().unwrap(), Role::Admin);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&Role::Validator).unwrap();
        assert_eq!(json, "\"validator\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
