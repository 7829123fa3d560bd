use async_trait::async_trait;
use formflow_db::models::UserModel;
use formflow_db::repository::{Load, LoadBatch};
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::UserRepositoryImpl;
use crate::utils::{order_by_ids, TryFromRow};

impl UserRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &UserRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<UserModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(r#"SELECT * FROM users WHERE id = ANY($1)"#)
            .bind(ids)
            .fetch_all(&*repo.pool)
            .await?;

        let items = rows
            .iter()
            .map(UserModel::try_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(order_by_ids(ids, items, |u| u.id))
    }
}

#[async_trait]
impl LoadBatch<Postgres, UserModel> for UserRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<UserModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}

#[async_trait]
impl Load<Postgres, UserModel> for UserRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<UserModel>, Box<dyn Error + Send + Sync>> {
        Ok(Self::load_batch_impl(self, &[id]).await?.pop().flatten())
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_utils::create_test_user;
    use crate::test_helper::setup_test_context;
    use formflow_api::Role;
    use formflow_db::repository::{CreateBatch, Load, LoadBatch};
    use serial_test::serial;
    use uuid::Uuid;

    #[tokio::test]
    #[ignore]
    #[serial]
    async fn test_load_batch_with_non_existing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.repos().user_repository;

        let saved = user_repo
            .create_batch(vec![create_test_user("Ana", Role::User)])
            .await?;

        let ids = vec![saved[0].id, Uuid::new_v4()];
        let loaded = user_repo.load_batch(&ids).await?;

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].as_ref().map(|u| u.name.as_str()), Some("Ana"));
        assert!(loaded[1].is_none());

        assert!(user_repo.load(Uuid::new_v4()).await?.is_none());
        Ok(())
    }
}
