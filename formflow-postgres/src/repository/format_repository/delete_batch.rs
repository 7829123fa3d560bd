use async_trait::async_trait;
use formflow_db::repository::DeleteBatch;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::FormatRepositoryImpl;

impl FormatRepositoryImpl {
    pub(super) async fn delete_batch_impl(
        repo: &FormatRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(0);
        }

        // Completions, their validations and notifications go with the format via ON DELETE CASCADE
        let result = sqlx::query(r#"DELETE FROM formats WHERE id = ANY($1)"#)
            .bind(ids)
            .execute(&*repo.pool)
            .await?;

        Ok(result.rows_affected() as usize)
    }
}

#[async_trait]
impl DeleteBatch<Postgres> for FormatRepositoryImpl {
    async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Self::delete_batch_impl(self, ids).await
    }
}
