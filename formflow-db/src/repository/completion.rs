use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::CompletionModel;
use crate::repository::{CreateBatch, Load, LoadBatch, UpdateBatch};

#[async_trait]
pub trait CompletionRepository<DB: Database>:
    Load<DB, CompletionModel>
    + LoadBatch<DB, CompletionModel>
    + CreateBatch<DB, CompletionModel>
    + UpdateBatch<DB, CompletionModel>
    + Send
    + Sync
{
    /// Completions owned by `owner_id`, newest first.
    async fn find_by_owner_id(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<CompletionModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Completions that have no validation row yet, oldest first.
    async fn find_without_validation(
        &self,
    ) -> Result<Vec<CompletionModel>, Box<dyn std::error::Error + Send + Sync>>;
}
