use formflow_db::models::NotificationModel;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::NotificationRepositoryImpl;
use crate::utils::TryFromRow;

impl NotificationRepositoryImpl {
    pub(super) async fn find_by_user_id_impl(
        repo: &NotificationRepositoryImpl,
        user_id: Uuid,
    ) -> Result<Vec<NotificationModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(
            r#"SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC, id"#,
        )
        .bind(user_id)
        .fetch_all(&*repo.pool)
        .await?;

        rows.iter().map(NotificationModel::try_from_row).collect()
    }
}
