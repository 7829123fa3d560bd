use formflow_db::models::ValidationModel;
use std::error::Error;

use super::repo_impl::ValidationRepositoryImpl;

impl ValidationRepositoryImpl {
    pub(super) async fn update_decision_impl(
        repo: &ValidationRepositoryImpl,
        validation: ValidationModel,
    ) -> Result<ValidationModel, Box<dyn Error + Send + Sync>> {
        let mut tx = repo.pool.begin().await?;

        let result = sqlx::query(
            r#"UPDATE validations SET status = $2, notes = $3, updated_at = $4 WHERE id = $1"#,
        )
        .bind(validation.id)
        .bind(validation.status)
        .bind(validation.notes.as_deref())
        .bind(validation.updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(format!("validation {} does not exist", validation.id).into());
        }

        if validation.status.is_decision() {
            sqlx::query(r#"UPDATE completions SET status = $2, updated_at = $3 WHERE id = $1"#)
                .bind(validation.completion_id)
                .bind(validation.status)
                .bind(validation.updated_at)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(validation)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_utils::{
        create_test_completion, create_test_format, create_test_user, create_test_validation,
    };
    use crate::test_helper::setup_test_context;
    use formflow_api::{Role, WorkflowStatus};
    use formflow_db::repository::{CreateBatch, Load, ValidationRepository};
    use serial_test::serial;

    #[tokio::test]
    #[ignore]
    #[serial]
    async fn test_update_decision_propagates_only_decisions() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let owner = create_test_user("Ana", Role::User);
        let validator = create_test_user("Victor", Role::Validator);
        let format = create_test_format("Carta");
        let completion = create_test_completion(owner.id, format.id);

        ctx.repos().user_repository.create_batch(vec![owner, validator.clone()]).await?;
        ctx.repos().format_repository.create_batch(vec![format]).await?;
        ctx.repos().completion_repository.create_batch(vec![completion.clone()]).await?;

        let validation_repo = &ctx.repos().validation_repository;
        let mut validation = validation_repo
            .create_decision(create_test_validation(completion.id, validator.id, WorkflowStatus::Rejected))
            .await?;

        validation.status = WorkflowStatus::Approved;
        validation_repo.update_decision(validation.clone()).await?;
        let loaded = ctx.repos().completion_repository.load(completion.id).await?.unwrap();
        assert_eq!(loaded.status, WorkflowStatus::Approved);

        validation.status = WorkflowStatus::Pending;
        validation_repo.update_decision(validation.clone()).await?;
        let loaded = ctx.repos().completion_repository.load(completion.id).await?.unwrap();
        assert_eq!(loaded.status, WorkflowStatus::Approved);

        let found = validation_repo.find_by_statuses(&[WorkflowStatus::Approved, WorkflowStatus::Rejected]).await?;
        assert!(found.is_empty());
        Ok(())
    }
}
