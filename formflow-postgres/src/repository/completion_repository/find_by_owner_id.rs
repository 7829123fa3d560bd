use formflow_db::models::CompletionModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::CompletionRepositoryImpl;
use crate::utils::TryFromRow;

impl CompletionRepositoryImpl {
    pub(super) async fn find_by_owner_id_impl(
        repo: &CompletionRepositoryImpl,
        owner_id: Uuid,
    ) -> Result<Vec<CompletionModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"SELECT * FROM completions WHERE owner_id = $1 ORDER BY created_at DESC, id"#,
        )
        .bind(owner_id)
        .fetch_all(&*repo.pool)
        .await?;

        rows.iter().map(CompletionModel::try_from_row).collect()
    }
}
