use formflow_db::models::ValidationModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::ValidationRepositoryImpl;
use crate::utils::TryFromRow;

impl ValidationRepositoryImpl {
    pub(super) async fn find_by_completion_id_impl(
        repo: &ValidationRepositoryImpl,
        completion_id: Uuid,
    ) -> Result<Option<ValidationModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query(r#"SELECT * FROM validations WHERE completion_id = $1"#)
            .bind(completion_id)
            .fetch_optional(&*repo.pool)
            .await?;

        row.as_ref().map(ValidationModel::try_from_row).transpose()
    }
}
