use async_trait::async_trait;
use formflow_db::models::UserModel;
use formflow_db::repository::UpdateBatch;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::UserRepositoryImpl;
use crate::utils::map_unique_violation;

impl UserRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &UserRepositoryImpl,
        items: Vec<UserModel>,
    ) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.pool.begin().await?;
        for item in &items {
            let result = sqlx::query(
                r#"
                UPDATE users
                SET name = $2, email = $3, password_hash = $4, role = $5, updated_at = $6
                WHERE id = $1
                "#,
            )
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.email)
            .bind(item.password_hash.as_deref())
            .bind(item.role)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, &format!("email '{}' is already registered", item.email)))?;

            if result.rows_affected() == 0 {
                return Err(format!("user {} does not exist", item.id).into());
            }
        }
        tx.commit().await?;

        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, UserModel> for UserRepositoryImpl {
    async fn update_batch(&self, items: Vec<UserModel>) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_utils::create_test_user;
    use crate::test_helper::setup_test_context;
    use formflow_api::Role;
    use formflow_db::repository::{CreateBatch, Load, UpdateBatch};
    use serial_test::serial;

    #[tokio::test]
    #[ignore]
    #[serial]
    async fn test_update_role() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.repos().user_repository;

        let mut user = user_repo
            .create_batch(vec![create_test_user("Ana", Role::User)])
            .await?
            .remove(0);
        user.role = Role::Validator;
        user_repo.update_batch(vec![user.clone()]).await?;

        let loaded = user_repo.load(user.id).await?.unwrap();
        assert_eq!(loaded.role, Role::Validator);
        Ok(())
    }
}
