use async_trait::async_trait;
use formflow_db::models::CompletionModel;
use formflow_db::repository::UpdateBatch;
use sqlx::types::Json;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::CompletionRepositoryImpl;

impl CompletionRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &CompletionRepositoryImpl,
        items: Vec<CompletionModel>,
    ) -> Result<Vec<CompletionModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.pool.begin().await?;
        for item in &items {
            let result = sqlx::query(
                r#"
                UPDATE completions
                SET data = $2, status = $3, updated_at = $4
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(Json(&item.data))
            .bind(item.status)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("completion {} does not exist", item.id).into());
            }
        }
        tx.commit().await?;

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, CompletionModel> for CompletionRepositoryImpl {
    async fn update_batch(&self, items: Vec<CompletionModel>) -> Result<Vec<CompletionModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
