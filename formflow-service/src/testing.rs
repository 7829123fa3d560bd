//! In-memory stand-ins for the store and the document converter.
//!
//! `InMemoryStore` implements every repository trait with the same
//! observable semantics as the PostgreSQL implementation: ordering of the
//! filtered scans, uniqueness of `users.email` and `validations.completion_id`,
//! and the completion status write that accompanies a validation decision.

use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use formflow_api::{ApiError, Role, WorkflowStatus};
use formflow_db::models::{
    CompletionModel, FormatModel, NotificationModel, NotificationStats, UserModel, ValidationModel,
};
use formflow_db::repository::{
    CompletionRepository, CreateBatch, DeleteBatch, FormatFilter, FormatRepository,
    Load, LoadBatch, NotificationRepository, UpdateBatch, UserRepository, ValidationRepository,
};
use parking_lot::Mutex;
use sqlx::Postgres;
use uuid::Uuid;

use crate::document::{ConversionError, HtmlToPdf, PageOptions};
use crate::Repositories;

type StoreError = Box<dyn Error + Send + Sync>;

#[derive(Default)]
struct StoreState {
    users: HashMap<Uuid, UserModel>,
    formats: HashMap<Uuid, FormatModel>,
    completions: HashMap<Uuid, CompletionModel>,
    validations: HashMap<Uuid, ValidationModel>,
    notifications: HashMap<Uuid, NotificationModel>,
    failing_notification_users: HashSet<Uuid>,
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories(&self) -> Repositories {
        let store = Arc::new(self.clone());
        Repositories {
            users: store.clone(),
            formats: store.clone(),
            completions: store.clone(),
            validations: store.clone(),
            notifications: store,
        }
    }

    pub fn insert_user(&self, user: UserModel) {
        self.state.lock().users.insert(user.id, user);
    }

    pub fn insert_format(&self, format: FormatModel) {
        self.state.lock().formats.insert(format.id, format);
    }

    pub fn insert_completion(&self, completion: CompletionModel) {
        self.state.lock().completions.insert(completion.id, completion);
    }

    pub fn insert_validation(&self, validation: ValidationModel) {
        self.state.lock().validations.insert(validation.id, validation);
    }

    pub fn insert_notification(&self, notification: NotificationModel) {
        self.state.lock().notifications.insert(notification.id, notification);
    }

    /// Make every notification write addressed to `user_id` fail.
    pub fn fail_notifications_for(&self, user_id: Uuid) {
        self.state.lock().failing_notification_users.insert(user_id);
    }

    pub fn completion(&self, id: Uuid) -> Option<CompletionModel> {
        self.state.lock().completions.get(&id).cloned()
    }

    pub fn notification(&self, id: Uuid) -> Option<NotificationModel> {
        self.state.lock().notifications.get(&id).cloned()
    }

    pub fn validations_for(&self, completion_id: Uuid) -> Vec<ValidationModel> {
        self.state
            .lock()
            .validations
            .values()
            .filter(|v| v.completion_id == completion_id)
            .cloned()
            .collect()
    }

    /// Notifications addressed to `user_id`, oldest first.
    pub fn notifications_for(&self, user_id: Uuid) -> Vec<NotificationModel> {
        let mut items: Vec<NotificationModel> = self
            .state
            .lock()
            .notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by_key(|n| n.created_at);
        items
    }
}

fn load_ordered<T: Clone>(map: &HashMap<Uuid, T>, ids: &[Uuid]) -> Vec<Option<T>> {
    ids.iter().map(|id| map.get(id).cloned()).collect()
}

fn update_existing<T: Clone>(
    map: &mut HashMap<Uuid, T>,
    items: Vec<T>,
    id_of: impl Fn(&T) -> Uuid,
    entity: &str,
) -> Result<Vec<T>, StoreError> {
    if let Some(missing) = items.iter().map(&id_of).find(|id| !map.contains_key(id)) {
        return Err(format!("{entity} {missing} does not exist").into());
    }
    for item in &items {
        map.insert(id_of(item), item.clone());
    }
    Ok(items)
}

// Users

#[async_trait]
impl Load<Postgres, UserModel> for InMemoryStore {
    async fn load(&self, id: Uuid) -> Result<Option<UserModel>, StoreError> {
        Ok(self.state.lock().users.get(&id).cloned())
    }
}

#[async_trait]
impl LoadBatch<Postgres, UserModel> for InMemoryStore {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<UserModel>>, StoreError> {
        Ok(load_ordered(&self.state.lock().users, ids))
    }
}

#[async_trait]
impl CreateBatch<Postgres, UserModel> for InMemoryStore {
    async fn create_batch(&self, items: Vec<UserModel>) -> Result<Vec<UserModel>, StoreError> {
        let mut state = self.state.lock();
        for item in &items {
            if state.users.values().any(|u| u.email == item.email) {
                return Err(Box::new(ApiError::Conflict(format!(
                    "email '{}' is already registered",
                    item.email
                ))));
            }
        }
        for item in &items {
            state.users.insert(item.id, item.clone());
        }
        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, UserModel> for InMemoryStore {
    async fn update_batch(&self, items: Vec<UserModel>) -> Result<Vec<UserModel>, StoreError> {
        update_existing(&mut self.state.lock().users, items, |u| u.id, "user")
    }
}

#[async_trait]
impl UserRepository<Postgres> for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<UserModel>, StoreError> {
        let mut users: Vec<UserModel> = self.state.lock().users.values().cloned().collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<UserModel>, StoreError> {
        let mut users: Vec<UserModel> = self
            .state
            .lock()
            .users
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, StoreError> {
        Ok(self.state.lock().users.values().find(|u| u.email == email).cloned())
    }
}

// Formats

#[async_trait]
impl Load<Postgres, FormatModel> for InMemoryStore {
    async fn load(&self, id: Uuid) -> Result<Option<FormatModel>, StoreError> {
        Ok(self.state.lock().formats.get(&id).cloned())
    }
}

#[async_trait]
impl LoadBatch<Postgres, FormatModel> for InMemoryStore {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<FormatModel>>, StoreError> {
        Ok(load_ordered(&self.state.lock().formats, ids))
    }
}

#[async_trait]
impl CreateBatch<Postgres, FormatModel> for InMemoryStore {
    async fn create_batch(&self, items: Vec<FormatModel>) -> Result<Vec<FormatModel>, StoreError> {
        let mut state = self.state.lock();
        for item in &items {
            state.formats.insert(item.id, item.clone());
        }
        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, FormatModel> for InMemoryStore {
    async fn update_batch(&self, items: Vec<FormatModel>) -> Result<Vec<FormatModel>, StoreError> {
        update_existing(&mut self.state.lock().formats, items, |f| f.id, "format")
    }
}

#[async_trait]
impl DeleteBatch<Postgres> for InMemoryStore {
    async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, StoreError> {
        let mut state = self.state.lock();
        let mut deleted = 0;
        for id in ids {
            if state.formats.remove(id).is_some() {
                deleted += 1;
            }
        }
        // Mirror ON DELETE CASCADE
        let removed: HashSet<Uuid> = state
            .completions
            .values()
            .filter(|c| !state.formats.contains_key(&c.format_id))
            .map(|c| c.id)
            .collect();
        state.completions.retain(|id, _| !removed.contains(id));
        state.validations.retain(|_, v| !removed.contains(&v.completion_id));
        Ok(deleted)
    }
}

#[async_trait]
impl FormatRepository<Postgres> for InMemoryStore {
    async fn find_by_filter(&self, filter: &FormatFilter) -> Result<Vec<FormatModel>, StoreError> {
        let mut formats: Vec<FormatModel> = self
            .state
            .lock()
            .formats
            .values()
            .filter(|f| filter.matches(f))
            .cloned()
            .collect();
        formats.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(formats)
    }
}

// Completions

#[async_trait]
impl Load<Postgres, CompletionModel> for InMemoryStore {
    async fn load(&self, id: Uuid) -> Result<Option<CompletionModel>, StoreError> {
        Ok(self.state.lock().completions.get(&id).cloned())
    }
}

#[async_trait]
impl LoadBatch<Postgres, CompletionModel> for InMemoryStore {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<CompletionModel>>, StoreError> {
        Ok(load_ordered(&self.state.lock().completions, ids))
    }
}

#[async_trait]
impl CreateBatch<Postgres, CompletionModel> for InMemoryStore {
    async fn create_batch(&self, items: Vec<CompletionModel>) -> Result<Vec<CompletionModel>, StoreError> {
        let mut state = self.state.lock();
        if let Some(item) = items.iter().find(|c| !state.formats.contains_key(&c.format_id)) {
            return Err(format!("format {} does not exist", item.format_id).into());
        }
        for item in &items {
            state.completions.insert(item.id, item.clone());
        }
        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, CompletionModel> for InMemoryStore {
    async fn update_batch(&self, items: Vec<CompletionModel>) -> Result<Vec<CompletionModel>, StoreError> {
        update_existing(&mut self.state.lock().completions, items, |c| c.id, "completion")
    }
}

#[async_trait]
impl CompletionRepository<Postgres> for InMemoryStore {
    async fn find_by_owner_id(&self, owner_id: Uuid) -> Result<Vec<CompletionModel>, StoreError> {
        let mut items: Vec<CompletionModel> = self
            .state
            .lock()
            .completions
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn find_without_validation(&self) -> Result<Vec<CompletionModel>, StoreError> {
        let state = self.state.lock();
        let validated: HashSet<Uuid> = state.validations.values().map(|v| v.completion_id).collect();
        let mut items: Vec<CompletionModel> = state
            .completions
            .values()
            .filter(|c| !validated.contains(&c.id))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(items)
    }
}

// Validations

fn newest_validations_first(items: &mut [ValidationModel]) {
    items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl Load<Postgres, ValidationModel> for InMemoryStore {
    async fn load(&self, id: Uuid) -> Result<Option<ValidationModel>, StoreError> {
        Ok(self.state.lock().validations.get(&id).cloned())
    }
}

#[async_trait]
impl LoadBatch<Postgres, ValidationModel> for InMemoryStore {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<ValidationModel>>, StoreError> {
        Ok(load_ordered(&self.state.lock().validations, ids))
    }
}

#[async_trait]
impl ValidationRepository<Postgres> for InMemoryStore {
    async fn find_by_completion_id(&self, completion_id: Uuid) -> Result<Option<ValidationModel>, StoreError> {
        Ok(self
            .state
            .lock()
            .validations
            .values()
            .find(|v| v.completion_id == completion_id)
            .cloned())
    }

    async fn find_by_validator_id(&self, validator_id: Uuid) -> Result<Vec<ValidationModel>, StoreError> {
        let mut items: Vec<ValidationModel> = self
            .state
            .lock()
            .validations
            .values()
            .filter(|v| v.validator_id == validator_id)
            .cloned()
            .collect();
        newest_validations_first(&mut items);
        Ok(items)
    }

    async fn find_all(&self) -> Result<Vec<ValidationModel>, StoreError> {
        let mut items: Vec<ValidationModel> = self.state.lock().validations.values().cloned().collect();
        newest_validations_first(&mut items);
        Ok(items)
    }

    async fn find_by_statuses(&self, statuses: &[WorkflowStatus]) -> Result<Vec<ValidationModel>, StoreError> {
        let mut items: Vec<ValidationModel> = self
            .state
            .lock()
            .validations
            .values()
            .filter(|v| statuses.contains(&v.status))
            .cloned()
            .collect();
        newest_validations_first(&mut items);
        Ok(items)
    }

    async fn create_decision(&self, validation: ValidationModel) -> Result<ValidationModel, StoreError> {
        let mut state = self.state.lock();
        if state.validations.values().any(|v| v.completion_id == validation.completion_id) {
            return Err(Box::new(ApiError::Conflict(format!(
                "completion {} has already been validated",
                validation.completion_id
            ))));
        }
        let completion = state
            .completions
            .get_mut(&validation.completion_id)
            .ok_or_else(|| format!("completion {} does not exist", validation.completion_id))?;
        completion.status = validation.status;
        completion.updated_at = validation.updated_at;
        state.validations.insert(validation.id, validation.clone());
        Ok(validation)
    }

    async fn update_decision(&self, validation: ValidationModel) -> Result<ValidationModel, StoreError> {
        let mut state = self.state.lock();
        if !state.validations.contains_key(&validation.id) {
            return Err(format!("validation {} does not exist", validation.id).into());
        }
        if validation.status.is_decision() {
            if let Some(completion) = state.completions.get_mut(&validation.completion_id) {
                completion.status = validation.status;
                completion.updated_at = validation.updated_at;
            }
        }
        state.validations.insert(validation.id, validation.clone());
        Ok(validation)
    }
}

// Notifications

#[async_trait]
impl Load<Postgres, NotificationModel> for InMemoryStore {
    async fn load(&self, id: Uuid) -> Result<Option<NotificationModel>, StoreError> {
        Ok(self.state.lock().notifications.get(&id).cloned())
    }
}

#[async_trait]
impl CreateBatch<Postgres, NotificationModel> for InMemoryStore {
    async fn create_batch(&self, items: Vec<NotificationModel>) -> Result<Vec<NotificationModel>, StoreError> {
        let mut state = self.state.lock();
        if let Some(item) = items
            .iter()
            .find(|n| state.failing_notification_users.contains(&n.user_id))
        {
            return Err(format!("simulated write failure for user {}", item.user_id).into());
        }
        for item in &items {
            state.notifications.insert(item.id, item.clone());
        }
        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<Postgres, NotificationModel> for InMemoryStore {
    async fn update_batch(&self, items: Vec<NotificationModel>) -> Result<Vec<NotificationModel>, StoreError> {
        update_existing(&mut self.state.lock().notifications, items, |n| n.id, "notification")
    }
}

#[async_trait]
impl NotificationRepository<Postgres> for InMemoryStore {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<NotificationModel>, StoreError> {
        let mut items = self.notifications_for(user_id);
        items.reverse();
        Ok(items)
    }

    async fn delete_updated_before(&self, cutoff: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut state = self.state.lock();
        let before = state.notifications.len();
        state.notifications.retain(|_, n| n.updated_at >= cutoff);
        Ok((before - state.notifications.len()) as u64)
    }

    async fn stats(&self, cutoff: DateTime<Utc>) -> Result<NotificationStats, StoreError> {
        let state = self.state.lock();
        let mut stats = NotificationStats::default();
        for n in state.notifications.values() {
            stats.total += 1;
            if n.read {
                stats.read += 1;
            } else {
                stats.unread += 1;
            }
            if n.updated_at < cutoff {
                stats.stale += 1;
            }
        }
        Ok(stats)
    }
}

/// Converter returning `%PDF-FAKE` followed by the HTML it was given.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeConverter;

pub const FAKE_PDF_PREFIX: &[u8] = b"%PDF-FAKE\n";

#[async_trait]
impl HtmlToPdf for FakeConverter {
    async fn convert(&self, html: &str, _options: &PageOptions) -> Result<Vec<u8>, ConversionError> {
        let mut bytes = FAKE_PDF_PREFIX.to_vec();
        bytes.extend_from_slice(html.as_bytes());
        Ok(bytes)
    }
}

/// Converter that always fails, for exercising `DependencyFailure` paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingConverter;

#[async_trait]
impl HtmlToPdf for FailingConverter {
    async fn convert(&self, _html: &str, _options: &PageOptions) -> Result<Vec<u8>, ConversionError> {
        Err(ConversionError::Empty)
    }
}
