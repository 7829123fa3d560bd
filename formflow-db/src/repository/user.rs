use async_trait::async_trait;
use formflow_api::Role;
use sqlx::Database;

use crate::models::UserModel;
use crate::repository::{CreateBatch, Load, LoadBatch, UpdateBatch};

#[async_trait]
pub trait UserRepository<DB: Database>:
    Load<DB, UserModel>
    + LoadBatch<DB, UserModel>
    + CreateBatch<DB, UserModel>
    + UpdateBatch<DB, UserModel>
    + Send
    + Sync
{
    /// All users ordered by name.
    async fn find_all(&self) -> Result<Vec<UserModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Users holding exactly `role`, used for validator fan-out.
    async fn find_by_role(
        &self,
        role: Role,
    ) -> Result<Vec<UserModel>, Box<dyn std::error::Error + Send + Sync>>;

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserModel>, Box<dyn std::error::Error + Send + Sync>>;
}
