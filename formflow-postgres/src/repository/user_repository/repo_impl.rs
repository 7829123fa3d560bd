use async_trait::async_trait;
use formflow_api::Role;
use formflow_db::models::UserModel;
use formflow_db::repository::UserRepository;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row};
use std::error::Error;
use std::sync::Arc;

use crate::utils::TryFromRow;

pub struct UserRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl UserRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for UserModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(UserModel {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role: row.try_get("role")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl UserRepository<Postgres> for UserRepositoryImpl {
    async fn find_all(&self) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        Self::find_all_impl(self).await
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_role_impl(self, role).await
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_email_impl(self, email).await
    }
}
