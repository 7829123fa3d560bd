use async_trait::async_trait;
use formflow_db::models::CompletionModel;
use formflow_db::repository::CreateBatch;
use sqlx::types::Json;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::CompletionRepositoryImpl;

impl CompletionRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &CompletionRepositoryImpl,
        items: Vec<CompletionModel>,
    ) -> Result<Vec<CompletionModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.pool.begin().await?;
        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO completions (id, owner_id, format_id, data, status, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(item.id)
            .bind(item.owner_id)
            .bind(item.format_id)
            .bind(Json(&item.data))
            .bind(item.status)
            .bind(item.created_at)
            .bind(item.updated_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<Postgres, CompletionModel> for CompletionRepositoryImpl {
    async fn create_batch(&self, items: Vec<CompletionModel>) -> Result<Vec<CompletionModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_utils::{create_test_completion, create_test_format, create_test_user};
    use crate::test_helper::setup_test_context;
    use formflow_api::{Role, WorkflowStatus};
    use formflow_db::repository::{CreateBatch, Load};
    use serial_test::serial;
    use serde_json::json;

    #[tokio::test]
    #[ignore]
    #[serial]
    async fn test_create_and_load() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user = create_test_user("Ana", Role::User);
        let format = create_test_format("Carta");
        let completion = create_test_completion(user.id, format.id);

        ctx.repos().user_repository.create_batch(vec![user]).await?;
        ctx.repos().format_repository.create_batch(vec![format]).await?;
        ctx.repos().completion_repository.create_batch(vec![completion.clone()]).await?;

        let loaded = ctx.repos().completion_repository.load(completion.id).await?.unwrap();
        assert_eq!(loaded.status, WorkflowStatus::Pending);
        assert_eq!(loaded.data.get("nombre"), Some(&json!("Ana")));
        Ok(())
    }

    #[tokio::test]
    #[ignore]
    #[serial]
    async fn test_unknown_format_is_rejected() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user = create_test_user("Ana", Role::User);
        let completion = create_test_completion(user.id, uuid::Uuid::new_v4());
        ctx.repos().user_repository.create_batch(vec![user]).await?;

        let result = ctx.repos().completion_repository.create_batch(vec![completion]).await;
        assert!(result.is_err());
        Ok(())
    }
}
