use async_trait::async_trait;
use formflow_db::models::UserModel;
use formflow_db::repository::CreateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::UserRepositoryImpl;
use crate::utils::map_unique_violation;

impl UserRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &UserRepositoryImpl,
        items: Vec<UserModel>,
    ) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.pool.begin().await?;
        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.email)
            .bind(item.password_hash.as_deref())
            .bind(item.role)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, &format!("email '{}' is already registered", item.email)))?;
        }
        tx.commit().await?;

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, UserModel> for UserRepositoryImpl {
    async fn create_batch(&self, items: Vec<UserModel>) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
