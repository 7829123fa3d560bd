use async_trait::async_trait;
use formflow_db::models::CompletionModel;
use formflow_db::repository::{Load, LoadBatch};
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CompletionRepositoryImpl;
use crate::utils::{order_by_ids, TryFromRow};

impl CompletionRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &CompletionRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<CompletionModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(r#"SELECT * FROM completions WHERE id = ANY($1)"#)
            .bind(ids)
            .fetch_all(&*repo.pool)
            .await?;

        let items = rows
            .iter()
            .map(CompletionModel::try_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(order_by_ids(ids, items, |c| c.id))
    }
}

#[async_trait]
impl LoadBatch<Postgres, CompletionModel> for CompletionRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<CompletionModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

#[async_trait]
impl Load<Postgres, CompletionModel> for CompletionRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<CompletionModel>, Box<dyn Error + Send + Sync>> {
        Ok(Self::load_batch_impl(self, &[id]).await?.pop().flatten())
    }
}
