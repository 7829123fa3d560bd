use async_trait::async_trait;
use formflow_api::WorkflowStatus;
use formflow_db::models::ValidationModel;
use formflow_db::repository::ValidationRepository;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

use crate::utils::TryFromRow;

pub struct ValidationRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl ValidationRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for ValidationModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ValidationModel {
            id: row.try_get("id")?,
            completion_id: row.try_get("completion_id")?,
            validator_id: row.try_get("validator_id")?,
            status: row.try_get("status")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl ValidationRepository<Postgres> for ValidationRepositoryImpl {
    async fn find_by_completion_id(
        &self,
        completion_id: Uuid,
    ) -> Result<Option<ValidationModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_completion_id_impl(self, completion_id).await
    }

    async fn find_by_validator_id(
        &self,
        validator_id: Uuid,
    ) -> Result<Vec<ValidationModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_validator_id_impl(self, Some(validator_id)).await
    }

    async fn find_all(&self) -> Result<Vec<ValidationModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_validator_id_impl(self, None).await
    }

    async fn find_by_statuses(
        &self,
        statuses: &[WorkflowStatus],
    ) -> Result<Vec<ValidationModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_statuses_impl(self, statuses).await
    }

    async fn create_decision(
        &self,
        validation: ValidationModel,
    ) -> Result<ValidationModel, Box<dyn Error + Send + Sync>> {
        Self::create_decision_impl(self, validation).await
    }

    async fn update_decision(
        &self,
        validation: ValidationModel,
    ) -> Result<ValidationModel, Box<dyn Error + Send + Sync>> {
        Self::update_decision_impl(self, validation).await
    }
}
