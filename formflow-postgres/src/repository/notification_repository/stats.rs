use chrono::{DateTime, Utc};
use formflow_db::models::NotificationStats;
use sqlx::Row;
use std::error::Error;

use super::repo_impl::NotificationRepositoryImpl;

impl NotificationRepositoryImpl {
    pub(super) async fn stats_impl(
        repo: &NotificationRepositoryImpl,
        cutoff: DateTime<Utc>,
    ) -> Result<NotificationStats, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE read) AS read,
                COUNT(*) FILTER (WHERE NOT read) AS unread,
                COUNT(*) FILTER (WHERE updated_at < $1) AS stale
            FROM notifications
            "#,
        )
        .bind(cutoff)
        .fetch_one(&*repo.pool)
        .await?;

        Ok(NotificationStats {
            total: row.try_get("total")?,
            read: row.try_get("read")?,
            unread: row.try_get("unread")?,
            stale: row.try_get("stale")?,
        })
    }
}
