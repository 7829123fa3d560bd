use async_trait::async_trait;
use formflow_db::models::FormatModel;
use formflow_db::repository::UpdateBatch;
use sqlx::types::Json;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::FormatRepositoryImpl;

impl FormatRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &FormatRepositoryImpl,
        items: Vec<FormatModel>,
    ) -> Result<Vec<FormatModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.pool.begin().await?;
        for item in &items {
            let result = sqlx::query(
                r#"
                UPDATE formats
                SET title = $2, status = $3, content = $4, variables = $5, updated_at = $6
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(&item.title)
            .bind(item.status)
            .bind(&item.content)
            .bind(Json(&item.variables))
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(format!("format {} does not exist", item.id).into());
            }
        }
        tx.commit().await?;

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, FormatModel> for FormatRepositoryImpl {
    async fn update_batch(&self, items: Vec<FormatModel>) -> Result<Vec<FormatModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
