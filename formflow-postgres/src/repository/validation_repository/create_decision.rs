use formflow_db::models::ValidationModel;
use std::error::Error;

use super::repo_impl::ValidationRepositoryImpl;
use crate::utils::map_unique_violation;

impl ValidationRepositoryImpl {
    /// The unique index on `completion_id` decides concurrent inserts; the
    /// loser sees `Conflict` and nothing is written.
    pub(super) async fn create_decision_impl(
        repo: &ValidationRepositoryImpl,
        validation: ValidationModel,
    ) -> Result<ValidationModel, Box<dyn Error + Send + Sync>> {
        let mut tx = repo.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO validations (id, completion_id, validator_id, status, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(validation.id)
        .bind(validation.completion_id)
        .bind(validation.validator_id)
        .bind(validation.status)
        .bind(validation.notes.as_deref())
        .bind(validation.created_at)
        .bind(validation.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(
                e,
                &format!("completion {} has already been validated", validation.completion_id),
            )
        })?;

        let result = sqlx::query(
            r#"UPDATE completions SET status = $2, updated_at = $3 WHERE id = $1"#,
        )
        .bind(validation.completion_id)
        .bind(validation.status)
        .bind(validation.updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(format!("completion {} does not exist", validation.completion_id).into());
        }

        tx.commit().await?;
        Ok(validation)
    }
}
