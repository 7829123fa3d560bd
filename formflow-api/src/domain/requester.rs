use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::role::{Role, REVIEWER_ROLES};
use crate::error::{ApiError, ApiResult};

/// Identity of the caller, supplied by the authentication gateway and trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Requester {
    pub fn new(id: Uuid, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Fails with `Forbidden` unless the requester holds one of `roles`.
    pub fn require_any(&self, roles: &[Role], action: &str) -> ApiResult<()> {
        if self.role.is_any_of(roles) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "role '{}' is not allowed to {action}",
                self.role
            )))
        }
    }

    pub fn is_reviewer(&self) -> bool {
        self.role.is_any_of(REVIEWER_ROLES)
    }
}
