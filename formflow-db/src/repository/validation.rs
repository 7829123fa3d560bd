use async_trait::async_trait;
use formflow_api::WorkflowStatus;
use sqlx::Database;
use uuid::Uuid;

use crate::models::ValidationModel;
use crate::repository::{Load, LoadBatch};

#[async_trait]
pub trait ValidationRepository<DB: Database>:
    Load<DB, ValidationModel> + LoadBatch<DB, ValidationModel> + Send + Sync
{
    async fn find_by_completion_id(
        &self,
        completion_id: Uuid,
    ) -> Result<Option<ValidationModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Validations recorded by `validator_id`, most recently updated first.
    async fn find_by_validator_id(
        &self,
        validator_id: Uuid,
    ) -> Result<Vec<ValidationModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// All validations, most recently updated first.
    async fn find_all(
        &self,
    ) -> Result<Vec<ValidationModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Validations whose status is one of `statuses`, most recently updated first.
    async fn find_by_statuses(
        &self,
        statuses: &[WorkflowStatus],
    ) -> Result<Vec<ValidationModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Insert `validation` and copy its status onto the parent completion in
    /// one transaction.
    ///
    /// A second validation for the same completion fails with a boxed
    /// `formflow_api::ApiError::Conflict`.
    async fn create_decision(
        &self,
        validation: ValidationModel,
    ) -> Result<ValidationModel, Box<dyn std::error::Error + Send + Sync>>;

    /// Persist new status and notes. When the new status is a decision it is
    /// copied onto the parent completion in the same transaction.
    async fn update_decision(
        &self,
        validation: ValidationModel,
    ) -> Result<ValidationModel, Box<dyn std::error::Error + Send + Sync>>;
}
