use async_trait::async_trait;
use formflow_db::models::NotificationModel;
use formflow_db::repository::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::NotificationRepositoryImpl;

impl NotificationRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &NotificationRepositoryImpl,
        items: Vec<NotificationModel>,
    ) -> Result<Vec<NotificationModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.pool.begin().await?;
        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO notifications (id, user_id, message, read, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(item.id)
            .bind(item.user_id)
            .bind(&item.message)
            .bind(item.read)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, NotificationModel> for NotificationRepositoryImpl {
    async fn create_batch(&self, items: Vec<NotificationModel>) -> Result<Vec<NotificationModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
