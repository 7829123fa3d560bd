use chrono::{DateTime, Utc};
use formflow_api::{CompletionData, WorkflowStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// Database model for one user's filled-in instance of a format.
///
/// Once a validation exists for the completion, `status` mirrors the
/// validation's decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionModel {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub format_id: Uuid,
    pub data: CompletionData,
    pub status: WorkflowStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompletionModel {
    pub fn new(owner_id: Uuid, format_id: Uuid, data: CompletionData) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            format_id,
            data,
            status: WorkflowStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for CompletionModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
