use async_trait::async_trait;
use formflow_db::models::CompletionModel;
use formflow_db::repository::CompletionRepository;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use crate::utils::{get_json, TryFromRow};

pub struct CompletionRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl CompletionRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for CompletionModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(CompletionModel {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            format_id: row.try_get("format_id")?,
            data: get_json(row, "data")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl CompletionRepository<Postgres> for CompletionRepositoryImpl {
    async fn find_by_owner_id(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<CompletionModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_owner_id_impl(self, owner_id).await
    }

    async fn find_without_validation(
        &self,
    ) -> Result<Vec<CompletionModel>, Box<dyn Error + Send + Sync>> {
        Self::find_without_validation_impl(self).await
    }
}
