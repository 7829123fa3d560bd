use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Database;
use uuid::Uuid;

use crate::models::{NotificationModel, NotificationStats};
use crate::repository::{CreateBatch, Load, UpdateBatch};

#[async_trait]
pub trait NotificationRepository<DB: Database>:
    Load<DB, NotificationModel>
    + CreateBatch<DB, NotificationModel>
    + UpdateBatch<DB, NotificationModel>
    + Send
    + Sync
{
    /// Notifications addressed to `user_id`, newest first.
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<NotificationModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Delete every notification last updated before `cutoff`, read or not.
    async fn delete_updated_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>>;

    /// Counts over all notifications; `stale` uses `cutoff`.
    async fn stats(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<NotificationStats, Box<dyn std::error::Error + Send + Sync>>;
}
