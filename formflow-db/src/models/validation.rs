use chrono::{DateTime, Utc};
use formflow_api::WorkflowStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// A validator's decision attached to exactly one completion.
///
/// `completion_id` is unique: the store rejects a second validation for the
/// same completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationModel {
    pub id: Uuid,
    pub completion_id: Uuid,
    pub validator_id: Uuid,
    pub status: WorkflowStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ValidationModel {
    pub fn new(
        completion_id: Uuid,
        validator_id: Uuid,
        status: WorkflowStatus,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            completion_id,
            validator_id,
            status,
            notes,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for ValidationModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
