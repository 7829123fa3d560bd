//! Directory of accounts and their roles.

use chrono::Utc;
use formflow_api::{ApiError, ApiResult, CreateUserRequest, Requester, UpdateRoleRequest, ADMIN_ROLES};
use formflow_db::models::UserModel;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::StoreResultExt;
use crate::Repositories;

pub struct UserDirectory {
    repos: Repositories,
}

impl UserDirectory {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn list(&self, requester: &Requester) -> ApiResult<Vec<UserModel>> {
        requester.require_any(ADMIN_ROLES, "list users")?;
        self.repos.users.find_all().await.or_dependency_failure("list users")
    }

    /// The stored account behind the requester's identity.
    pub async fn me(&self, requester: &Requester) -> ApiResult<UserModel> {
        self.load(requester.id).await
    }

    pub async fn create(&self, requester: &Requester, request: CreateUserRequest) -> ApiResult<UserModel> {
        requester.require_any(ADMIN_ROLES, "create users")?;
        request.validate()?;

        let taken = self
            .repos
            .users
            .find_by_email(&request.email)
            .await
            .or_dependency_failure("look up user")?;
        if taken.is_some() {
            return Err(ApiError::Conflict(format!("email '{}' is already registered", request.email)));
        }

        let user = UserModel::new(request.name, request.email, request.role);
        let mut saved = self
            .repos
            .users
            .create_batch(vec![user])
            .await
            .or_dependency_failure("create user")?;
        let user = saved
            .pop()
            .ok_or_else(|| ApiError::DependencyFailure("create user returned nothing".into()))?;

        info!(user_id = %user.id, role = %user.role, "user created");
        Ok(user)
    }

    pub async fn update_role(&self, requester: &Requester, id: Uuid, request: UpdateRoleRequest) -> ApiResult<UserModel> {
        requester.require_any(ADMIN_ROLES, "change roles")?;

        let mut user = self.load(id).await?;
        let previous = user.role;
        user.role = request.role;
        user.updated_at = Utc::now();

        let mut saved = self
            .repos
            .users
            .update_batch(vec![user])
            .await
            .or_dependency_failure("update user")?;
        let user = saved
            .pop()
            .ok_or_else(|| ApiError::DependencyFailure("update user returned nothing".into()))?;

        info!(user_id = %user.id, from = %previous, to = %user.role, "role changed");
        Ok(user)
    }

    async fn load(&self, id: Uuid) -> ApiResult<UserModel> {
        self.repos
            .users
            .load(id)
            .await
            .or_dependency_failure("load user")?
            .ok_or_else(|| ApiError::not_found("user", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStore;
    use formflow_api::Role;

    fn setup() -> (InMemoryStore, UserDirectory, Requester) {
        let store = InMemoryStore::new();
        let admin = UserModel::new("Root", "root@example.com", Role::Admin);
        store.insert_user(admin.clone());
        let directory = UserDirectory::new(store.repositories());
        let requester = Requester::new(admin.id, "Root", "root@example.com", Role::Admin);
        (store, directory, requester)
    }

    fn new_user(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: "Ana".to_string(),
            email: email.to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_taken_email() {
        let (_store, directory, admin) = setup();
        directory.create(&admin, new_user("ana@example.com")).await.unwrap();

        assert!(matches!(
            directory.create(&admin, new_user("ana@example.com")).await,
            Err(ApiError::Conflict(_))
        ));
        assert!(matches!(
            directory.create(&admin, new_user("not-an-email")).await,
            Err(ApiError::InvalidInput(_))
        ));
        assert_eq!(directory.list(&admin).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_role_change_and_gate() {
        let (_store, directory, admin) = setup();
        let ana = directory.create(&admin, new_user("ana@example.com")).await.unwrap();

        let promoted = directory
            .update_role(&admin, ana.id, UpdateRoleRequest { role: Role::Validator })
            .await
            .unwrap();
        assert_eq!(promoted.role, Role::Validator);

        let as_ana = Requester::new(ana.id, "Ana", "ana@example.com", Role::Validator);
        assert_eq!(directory.me(&as_ana).await.unwrap().role, Role::Validator);
        assert!(matches!(directory.list(&as_ana).await, Err(ApiError::Forbidden(_))));
        assert!(matches!(
            directory.update_role(&admin, Uuid::new_v4(), UpdateRoleRequest { role: Role::Admin }).await,
            Err(ApiError::NotFound(_))
        ));
    }
}
