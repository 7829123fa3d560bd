use async_trait::async_trait;
use formflow_db::models::FormatModel;
use formflow_db::repository::CreateBatch;
use sqlx::types::Json;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::FormatRepositoryImpl;

impl FormatRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &FormatRepositoryImpl,
        items: Vec<FormatModel>,
    ) -> Result<Vec<FormatModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.pool.begin().await?;
        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO formats (id, title, status, content, variables, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(item.id)
            .bind(&item.title)
            .bind(item.status)
            .bind(&item.content)
            .bind(Json(&item.variables))
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
impl CreateBatch<Postgres, FormatModel> for FormatRepositoryImpl {
    async fn create_batch(&self, items: Vec<FormatModel>) -> Result<Vec<FormatModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
