use formflow_api::Role;
use formflow_db::models::UserModel;
use std::error::Error;

use super::repo_impl::UserRepositoryImpl;
use crate::utils::TryFromRow;

impl UserRepositoryImpl {
    pub(super) async fn find_by_role_impl(
        repo: &UserRepositoryImpl,
        role: Role,
    ) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(r#"SELECT * FROM users WHERE role = $1 ORDER BY name, id"#)
            .bind(role)
            .fetch_all(&*repo.pool)
            .await?;

        rows.iter().map(UserModel::try_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_utils::create_test_user;
    use crate::test_helper::setup_test_context;
    use formflow_api::Role;
    use formflow_db::repository::{CreateBatch, UserRepository};
    use serial_test::serial;

    #[tokio::test]
    #[ignore]
    #[serial]
    async fn test_find_by_role() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.repos().user_repository;

        user_repo
            .create_batch(vec![
                create_test_user("Ana", Role::User),
                create_test_user("Victor", Role::Validator),
                create_test_user("Vera", Role::Validator),
                create_test_user("Root", Role::Admin),
            ])
            .await?;

        let validators = user_repo.find_by_role(Role::Validator).await?;
        let names: Vec<&str> = validators.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Vera", "Victor"]);
        Ok(())
    }
}
