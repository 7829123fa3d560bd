use formflow_db::models::UserModel;
use std::error::Error;

use super::repo_impl::UserRepositoryImpl;
use crate::utils::TryFromRow;

impl UserRepositoryImpl {
    pub(super) async fn find_all_impl(
        repo: &UserRepositoryImpl,
    ) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(r#"SELECT * FROM users ORDER BY name, id"#)
            .fetch_all(&*repo.pool)
            .await?;

        rows.iter().map(UserModel::try_from_row).collect()
    }
}
