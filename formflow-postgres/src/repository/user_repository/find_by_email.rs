use formflow_db::models::UserModel;
use std::error::Error;

use super::repo_impl::UserRepositoryImpl;
use crate::utils::TryFromRow;

impl UserRepositoryImpl {
    pub(super) async fn find_by_email_impl(
        repo: &UserRepositoryImpl,
        email: &str,
    ) -> Result<Option<UserModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query(r#"SELECT * FROM users WHERE email = $1"#)
            .bind(email)
            .fetch_optional(&*repo.pool)
            .await?;

        row.as_ref().map(UserModel::try_from_row).transpose()
    }
}
