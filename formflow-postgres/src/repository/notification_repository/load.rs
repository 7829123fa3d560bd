use async_trait::async_trait;
use formflow_db::models::NotificationModel;
use formflow_db::repository::Load;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::NotificationRepositoryImpl;
use crate::utils::TryFromRow;

impl NotificationRepositoryImpl {
    pub(super) async fn load_impl(
        repo: &NotificationRepositoryImpl,
        id: Uuid,
    ) -> Result<Option<NotificationModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query(r#"SELECT * FROM notifications WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&*repo.pool)
            .await?;

        row.as_ref().map(NotificationModel::try_from_row).transpose()
    }
}

#[async_trait]
impl Load<Postgres, NotificationModel> for NotificationRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<NotificationModel>, Box<dyn Error + Send + Sync>> {
        Self::load_impl(self, id).await
    }
}
