use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// A transient per-user message.
///
/// Rows are removed by the retention sweep once `updated_at` falls behind
/// the cutoff, whether or not they were read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NotificationModel {
    pub fn new(user_id: Uuid, message: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            message: message.into(),
            read: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for NotificationModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

/// Row counts reported before and after a retention sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationStats {
    pub total: i64,
    pub read: i64,
    pub unread: i64,
    /// Rows whose `updated_at` is older than the retention cutoff
    pub stale: i64,
}
