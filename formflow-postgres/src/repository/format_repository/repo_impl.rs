use async_trait::async_trait;
use formflow_db::models::FormatModel;
use formflow_db::repository::{FormatFilter, FormatRepository};
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use std::error::Error;
use std::sync::Arc;

use crate::utils::{get_json, TryFromRow};

pub struct FormatRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl FormatRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for FormatModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(FormatModel {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            status: row.try_get("status")?,
            content: row.try_get("content")?,
            variables: get_json(row, "variables")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl FormatRepository<Postgres> for FormatRepositoryImpl {
    async fn find_by_filter(
        &self,
        filter: &FormatFilter,
    ) -> Result<Vec<FormatModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_filter_impl(self, filter).await
    }
}
