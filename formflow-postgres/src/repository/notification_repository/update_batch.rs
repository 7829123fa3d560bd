use async_trait::async_trait;
use formflow_db::models::NotificationModel;
use formflow_db::repository::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::NotificationRepositoryImpl;

impl NotificationRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &NotificationRepositoryImpl,
        items: Vec<NotificationModel>,
    ) -> Result<Vec<NotificationModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.pool.begin().await?;
        for item in &items {
            let result = sqlx::query(
                r#"UPDATE notifications SET message = $2, read = $3, updated_at = $4 WHERE id = $1"#,
            )
            .bind(item.id)
            .bind(&item.message)
            .bind(item.read)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("notification {} does not exist", item.id).into());
            }
        }
        tx.commit().await?;

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, NotificationModel> for NotificationRepositoryImpl {
    async fn update_batch(&self, items: Vec<NotificationModel>) -> Result<Vec<NotificationModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
