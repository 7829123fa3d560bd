use sqlx::PgPool;
use std::sync::Arc;

use crate::repository::{
    CompletionRepositoryImpl, FormatRepositoryImpl, NotificationRepositoryImpl,
    UserRepositoryImpl, ValidationRepositoryImpl,
};

pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    /// Create every repository over the shared pool
    pub fn create_all_repositories(&self) -> PostgresRepositoryBundle {
        PostgresRepositoryBundle {
            user_repository: Arc::new(UserRepositoryImpl::new(self.pool.clone())),
            format_repository: Arc::new(FormatRepositoryImpl::new(self.pool.clone())),
            completion_repository: Arc::new(CompletionRepositoryImpl::new(self.pool.clone())),
            validation_repository: Arc::new(ValidationRepositoryImpl::new(self.pool.clone())),
            notification_repository: Arc::new(NotificationRepositoryImpl::new(self.pool.clone())),
        }
    }
}

pub struct PostgresRepositoryBundle {
    pub user_repository: Arc<UserRepositoryImpl>,
    pub format_repository: Arc<FormatRepositoryImpl>,
    pub completion_repository: Arc<CompletionRepositoryImpl>,
    pub validation_repository: Arc<ValidationRepositoryImpl>,
    pub notification_repository: Arc<NotificationRepositoryImpl>,
}
