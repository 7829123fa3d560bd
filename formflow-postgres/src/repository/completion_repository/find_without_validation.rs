use formflow_db::models::CompletionModel;
use std::error::Error;

use super::repo_impl::CompletionRepositoryImpl;
use crate::utils::TryFromRow;

impl CompletionRepositoryImpl {
    pub(super) async fn find_without_validation_impl(
        repo: &CompletionRepositoryImpl,
    ) -> Result<Vec<CompletionModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"
            SELECT c.* FROM completions c
            LEFT JOIN validations v ON v.completion_id = c.id
            WHERE v.id IS NULL
            ORDER BY c.created_at, c.id
            "#,
        )
        .fetch_all(&*repo.pool)
        .await?;

        rows.iter().map(CompletionModel::try_from_row).collect()
    }
}
