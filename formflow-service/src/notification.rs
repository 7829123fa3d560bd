//! Per-user notifications and the retention sweep.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use formflow_api::{ApiError, ApiResult, Requester};
use formflow_db::models::{NotificationModel, NotificationStats};
use formflow_db::repository::NotificationRepository;
use futures::future::join_all;
use serde::Serialize;
use sqlx::Postgres;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::StoreResultExt;
use crate::scheduler::Job;

/// Scheduler key of the recurring retention sweep.
pub const NOTIFICATION_SWEEP_JOB: &str = "notification-cleanup";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupReport {
    pub deleted_count: u64,
    /// Counts taken after the deletion.
    pub stats: NotificationStats,
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    notifications: Arc<dyn NotificationRepository<Postgres>>,
    retention: Duration,
}

impl NotificationDispatcher {
    pub fn new(notifications: Arc<dyn NotificationRepository<Postgres>>, retention: Duration) -> Self {
        Self {
            notifications,
            retention,
        }
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    pub async fn notify(&self, user_id: Uuid, message: impl Into<String>) -> ApiResult<NotificationModel> {
        let notification = NotificationModel::new(user_id, message);
        let mut saved = self
            .notifications
            .create_batch(vec![notification])
            .await
            .or_dependency_failure("create notification")?;
        saved
            .pop()
            .ok_or_else(|| ApiError::DependencyFailure("create notification returned nothing".into()))
    }

    /// Best-effort fan-out: one independent write per recipient. Failed
    /// writes are logged and skipped. Returns how many were stored.
    pub async fn notify_all(&self, user_ids: &[Uuid], message: &str) -> usize {
        let writes = user_ids.iter().map(|user_id| async move {
            let result = self.notify(*user_id, message).await;
            if let Err(err) = &result {
                warn!(user_id = %user_id, error = %err, "notification write failed");
            }
            result
        });

        join_all(writes).await.iter().filter(|r| r.is_ok()).count()
    }

    /// Newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> ApiResult<Vec<NotificationModel>> {
        self.notifications
            .find_by_user_id(user_id)
            .await
            .or_dependency_failure("list notifications")
    }

    /// Marks the requester's own notification as read. Already-read rows are
    /// returned untouched. Rows of other users are reported as absent.
    pub async fn mark_read(&self, requester: &Requester, id: Uuid) -> ApiResult<NotificationModel> {
        let mut notification = self
            .notifications
            .load(id)
            .await
            .or_dependency_failure("load notification")?
            .filter(|n| n.user_id == requester.id)
            .ok_or_else(|| ApiError::not_found("notification", id))?;

        if notification.read {
            return Ok(notification);
        }

        notification.read = true;
        notification.updated_at = Utc::now();
        let mut updated = self
            .notifications
            .update_batch(vec![notification])
            .await
            .or_dependency_failure("mark notification read")?;
        updated
            .pop()
            .ok_or_else(|| ApiError::DependencyFailure("mark notification read returned nothing".into()))
    }

    /// Clamped to the earliest representable instant for very long retentions.
    pub fn cutoff_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_signed(self.retention).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub async fn stats(&self) -> ApiResult<NotificationStats> {
        self.notifications
            .stats(self.cutoff_at(Utc::now()))
            .await
            .or_dependency_failure("notification stats")
    }

    pub async fn sweep(&self) -> ApiResult<u64> {
        self.sweep_at(Utc::now()).await
    }

    /// Deletes every notification last updated before `now - retention`,
    /// read or unread.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> ApiResult<u64> {
        self.notifications
            .delete_updated_before(self.cutoff_at(now))
            .await
            .or_dependency_failure("sweep notifications")
    }

    pub async fn cleanup_now(&self) -> ApiResult<CleanupReport> {
        let deleted_count = self.sweep().await?;
        let stats = self.stats().await?;
        info!(deleted_count, remaining = stats.total, "manual notification cleanup finished");
        Ok(CleanupReport { deleted_count, stats })
    }

    /// Body of the scheduled job. Errors are logged so the schedule keeps running.
    pub async fn run_sweep_with_logging(&self) {
        match self.stats().await {
            Ok(before) => info!(
                total = before.total,
                read = before.read,
                unread = before.unread,
                stale = before.stale,
                "notification sweep starting"
            ),
            Err(err) => warn!(error = %err, "could not read notification stats before sweep"),
        }

        match self.sweep().await {
            Ok(deleted) => info!(deleted, retention_days = self.retention.num_days(), "notification sweep finished"),
            Err(err) => {
                error!(error = %err, "notification sweep failed");
                return;
            }
        }

        if let Ok(after) = self.stats().await {
            info!(total = after.total, unread = after.unread, "notifications after sweep");
        }
    }

    /// A scheduler job running [`Self::run_sweep_with_logging`].
    pub fn sweep_job(&self) -> Job {
        let dispatcher = self.clone();
        Arc::new(move || {
            let dispatcher = dispatcher.clone();
            Box::pin(async move { dispatcher.run_sweep_with_logging().await })
        })
    }
}
