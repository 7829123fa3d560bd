//! Workflow services: formats, completions, validations, notifications,
//! scheduled cleanup and document rendering.
//!
//! Every service talks to storage through the repository traits of
//! `formflow-db`, so the same code runs against PostgreSQL in production and
//! against [`testing::InMemoryStore`] in tests.

pub mod completion;
pub mod document;
pub mod error;
pub mod format;
pub mod notification;
pub mod scheduler;
pub mod template;
pub mod user;
pub mod validation;
pub mod views;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

use std::sync::Arc;

use formflow_db::repository::{
    CompletionRepository, FormatRepository, NotificationRepository, UserRepository,
    ValidationRepository,
};
use sqlx::Postgres;

pub use completion::CompletionService;
pub use document::{DocumentService, HtmlToPdf, PageOptions, RenderedDocument, WkhtmltopdfConverter};
pub use format::FormatService;
pub use notification::{CleanupReport, NotificationDispatcher, NOTIFICATION_SWEEP_JOB};
pub use scheduler::{Job, Scheduler};
pub use user::UserDirectory;
pub use validation::ValidationService;

/// Storage handles shared by every service.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository<Postgres>>,
    pub formats: Arc<dyn FormatRepository<Postgres>>,
    pub completions: Arc<dyn CompletionRepository<Postgres>>,
    pub validations: Arc<dyn ValidationRepository<Postgres>>,
    pub notifications: Arc<dyn NotificationRepository<Postgres>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Notifications untouched for longer than this are swept.
    pub retention_days: i64,
}

/// Longest notification retention accepted from configuration.
pub const MAX_RETENTION_DAYS: i64 = 36_500;

impl ServiceSettings {
    /// Retention as a duration, saturating instead of overflowing.
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::try_days(self.retention_days).unwrap_or(chrono::Duration::MAX)
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self { retention_days: 7 }
    }
}

pub struct Services {
    pub formats: FormatService,
    pub users: UserDirectory,
    pub completions: CompletionService,
    pub validations: ValidationService,
    pub notifications: NotificationDispatcher,
    pub documents: DocumentService,
}

impl Services {
    pub fn new(
        repos: Repositories,
        converter: Arc<dyn HtmlToPdf>,
        settings: ServiceSettings,
    ) -> Self {
        let notifications = NotificationDispatcher::new(repos.notifications.clone(), settings.retention());

        Self {
            formats: FormatService::new(repos.clone()),
            users: UserDirectory::new(repos.clone()),
            completions: CompletionService::new(repos.clone(), notifications.clone()),
            validations: ValidationService::new(repos.clone(), notifications.clone()),
            documents: DocumentService::new(repos, converter, PageOptions::default()),
            notifications,
        }
    }
}
