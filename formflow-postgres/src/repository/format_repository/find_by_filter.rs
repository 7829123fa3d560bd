use formflow_db::models::FormatModel;
use formflow_db::repository::FormatFilter;
use std::error::Error;

use super::repo_impl::FormatRepositoryImpl;
use crate::utils::TryFromRow;

impl FormatRepositoryImpl {
    pub(super) async fn find_by_filter_impl(
        repo: &FormatRepositoryImpl,
        filter: &FormatFilter,
    ) -> Result<Vec<FormatModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM formats
            WHERE ($1::text IS NULL OR title = $1)
              AND ($2::format_status IS NULL OR status = $2)
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(filter.title.as_deref())
        .bind(filter.status)
        .fetch_all(&*repo.pool)
        .await?;

        rows.iter().map(FormatModel::try_from_row).collect()
    }
}
