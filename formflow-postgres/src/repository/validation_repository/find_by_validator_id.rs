use formflow_db::models::ValidationModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ValidationRepositoryImpl;
use crate::utils::TryFromRow;

impl ValidationRepositoryImpl {
    /// `None` lists every validation.
    pub(super) async fn find_by_validator_id_impl(
        repo: &ValidationRepositoryImpl,
        validator_id: Option<Uuid>,
    ) -> Result<Vec<ValidationModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM validations
            WHERE ($1::uuid IS NULL OR validator_id = $1)
            ORDER BY updated_at DESC, id
            "#,
        )
        .bind(validator_id)
        .fetch_all(&*repo.pool)
        .await?;

        rows.iter().map(ValidationModel::try_from_row).collect()
    }
}
