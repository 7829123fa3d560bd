use formflow_api::WorkflowStatus;
use formflow_db::models::ValidationModel;
use std::error::Error;

use super::repo_impl::ValidationRepositoryImpl;
use crate::utils::TryFromRow;

impl ValidationRepositoryImpl {
    pub(super) async fn find_by_statuses_impl(
        repo: &ValidationRepositoryImpl,
        statuses: &[WorkflowStatus],
    ) -> Result<Vec<ValidationModel>, Box<dyn Error + Send + Sync>> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }

        let labels: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
        let rows = sqlx::query(
            r#"
            SELECT * FROM validations
            WHERE status::text = ANY($1)
            ORDER BY updated_at DESC, id
            "#,
        )
        .bind(labels)
        .fetch_all(&*repo.pool)
        .await?;

        rows.iter().map(ValidationModel::try_from_row).collect()
    }
}
