use async_trait::async_trait;
use formflow_db::models::ValidationModel;
use formflow_db::repository::{Load, LoadBatch};
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ValidationRepositoryImpl;
use crate::utils::{order_by_ids, TryFromRow};

impl ValidationRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &ValidationRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ValidationModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(r#"SELECT * FROM validations WHERE id = ANY($1)"#)
            .bind(ids)
            .fetch_all(&*repo.pool)
            .await?;

        let items = rows
            .iter()
            .map(ValidationModel::try_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(order_by_ids(ids, items, |v| v.id))
    }
}

#[async_trait]
impl LoadBatch<Postgres, ValidationModel> for ValidationRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<ValidationModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

#[async_trait]
impl Load<Postgres, ValidationModel> for ValidationRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<ValidationModel>, Box<dyn Error + Send + Sync>> {
        Ok(Self::load_batch_impl(self, &[id]).await?.pop().flatten())
    }
}
