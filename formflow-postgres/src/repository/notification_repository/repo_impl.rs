use async_trait::async_trait;
use chrono::{DateTime, Utc};
use formflow_db::models::{NotificationModel, NotificationStats};
use formflow_db::repository::NotificationRepository;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use crate::utils::TryFromRow;

pub struct NotificationRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl NotificationRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for NotificationModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(NotificationModel {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            message: row.try_get("message")?,
            read: row.try_get("read")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl NotificationRepository<Postgres> for NotificationRepositoryImpl {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<NotificationModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_user_id_impl(self, user_id).await
    }

    async fn delete_updated_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, Box<dyn Error + Send + Sync>> {
        Self::delete_updated_before_impl(self, cutoff).await
    }

    async fn stats(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<NotificationStats, Box<dyn Error + Send + Sync>> {
        Self::stats_impl(self, cutoff).await
    }
}
