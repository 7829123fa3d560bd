use chrono::{DateTime, Utc};
use std::error::Error;

use super::repo_impl::NotificationRepositoryImpl;

impl NotificationRepositoryImpl {
    pub(super) async fn delete_updated_before_impl(
        repo: &NotificationRepositoryImpl,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, Box<dyn Error + Send + Sync>> {
        let result = sqlx::query(r#"DELETE FROM notifications WHERE updated_at < $1"#)
            .bind(cutoff)
            .execute(&*repo.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
