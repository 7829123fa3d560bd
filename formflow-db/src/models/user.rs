use chrono::{DateTime, Utc};
use formflow_api::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// Database model for an account known to the workflow.
///
/// - `email` is unique across all users.
/// - `password_hash` is owned by the authentication gateway and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserModel {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserModel {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash: None,
            role,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for UserModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
