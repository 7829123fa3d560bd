//! Completion lifecycle: submit against an active format, edit while
//! pending or rejected.

use chrono::Utc;
use formflow_api::{
    ApiError, ApiResult, CompletionData, CreateCompletionRequest, Requester, Role,
    UpdateCompletionRequest, WorkflowStatus,
};
use formflow_db::models::{CompletionModel, FormatModel};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::StoreResultExt;
use crate::notification::NotificationDispatcher;
use crate::views::{completion_views, CompletionView};
use crate::Repositories;

pub struct CompletionService {
    repos: Repositories,
    notifications: NotificationDispatcher,
}

impl CompletionService {
    pub fn new(repos: Repositories, notifications: NotificationDispatcher) -> Self {
        Self {
            repos,
            notifications,
        }
    }

    /// Submit a new completion. Every validator is told it awaits review.
    pub async fn create(&self, requester: &Requester, request: CreateCompletionRequest) -> ApiResult<CompletionModel> {
        let format = self.usable_format(request.format_id, true).await?;
        check_required(&format, &request.data)?;

        let completion = CompletionModel::new(requester.id, format.id, request.data);
        let mut saved = self
            .repos
            .completions
            .create_batch(vec![completion])
            .await
            .or_dependency_failure("create completion")?;
        let completion = saved
            .pop()
            .ok_or_else(|| ApiError::DependencyFailure("create completion returned nothing".into()))?;

        info!(completion_id = %completion.id, format_id = %format.id, owner = %requester.id, "completion submitted");
        self.notify_validators(&format!(
            "New format \"{}\" submitted by {} requires validation",
            format.title, requester.name
        ))
        .await;

        Ok(completion)
    }

    /// Replace the data of the requester's own completion and return it to
    /// pending. Validators are notified again only when it had been rejected.
    pub async fn update(
        &self,
        requester: &Requester,
        id: Uuid,
        request: UpdateCompletionRequest,
    ) -> ApiResult<CompletionModel> {
        let mut completion = self
            .repos
            .completions
            .load(id)
            .await
            .or_dependency_failure("load completion")?
            .ok_or_else(|| ApiError::not_found("completion", id))?;

        if completion.owner_id != requester.id {
            return Err(ApiError::Forbidden("only the owner may edit a completion".into()));
        }
        if !completion.status.is_editable() {
            return Err(ApiError::InvalidState(format!(
                "a {} completion cannot be edited",
                completion.status
            )));
        }

        let format = self.usable_format(completion.format_id, false).await?;
        check_required(&format, &request.data)?;

        let previous = completion.status;
        completion.data = request.data;
        completion.status = WorkflowStatus::Pending;
        completion.updated_at = Utc::now();

        let mut saved = self
            .repos
            .completions
            .update_batch(vec![completion])
            .await
            .or_dependency_failure("update completion")?;
        let completion = saved
            .pop()
            .ok_or_else(|| ApiError::DependencyFailure("update completion returned nothing".into()))?;

        info!(completion_id = %completion.id, previous = %previous, "completion edited");
        if previous == WorkflowStatus::Rejected {
            self.notify_validators(&format!(
                "Format \"{}\" updated by {} requires a new validation",
                format.title, requester.name
            ))
            .await;
        }

        Ok(completion)
    }

    /// The requester's completions, newest first.
    pub async fn list_for_owner(&self, requester: &Requester) -> ApiResult<Vec<CompletionView>> {
        let completions = self
            .repos
            .completions
            .find_by_owner_id(requester.id)
            .await
            .or_dependency_failure("list completions")?;
        completion_views(&self.repos, completions).await
    }

    /// Missing formats, and inactive ones when `require_active`, are input errors.
    async fn usable_format(&self, format_id: Uuid, require_active: bool) -> ApiResult<FormatModel> {
        let format = self
            .repos
            .formats
            .load(format_id)
            .await
            .or_dependency_failure("load format")?
            .ok_or_else(|| ApiError::InvalidInput(format!("format {format_id} does not exist")))?;

        if require_active && !format.is_active() {
            return Err(ApiError::InvalidInput(format!("format {format_id} is not active")));
        }
        Ok(format)
    }

    async fn notify_validators(&self, message: &str) {
        match self.repos.users.find_by_role(Role::Validator).await {
            Ok(validators) => {
                let ids: Vec<Uuid> = validators.iter().map(|v| v.id).collect();
                let delivered = self.notifications.notify_all(&ids, message).await;
                if delivered < ids.len() {
                    warn!(delivered, expected = ids.len(), "some validator notifications were not stored");
                }
            }
            Err(err) => warn!(error = %err, "could not list validators for notification"),
        }
    }
}

fn check_required(format: &FormatModel, data: &CompletionData) -> ApiResult<()> {
    let missing = format.missing_required(data);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::InvalidInput(format!(
            "missing required variables: {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStore;
    use chrono::Duration;
    use formflow_api::{FormatStatus, VariableDefinition};
    use formflow_db::models::UserModel;
    use serde_json::{json, Value};

    struct Fixture {
        store: InMemoryStore,
        service: CompletionService,
        owner: Requester,
        validators: Vec<UserModel>,
        format: FormatModel,
    }

    fn data(value: Value) -> CompletionData {
        value.as_object().cloned().unwrap()
    }

    fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let owner = UserModel::new("Ana", "ana@example.com", Role::User);
        let validators = vec![
            UserModel::new("Victor", "victor@example.com", Role::Validator),
            UserModel::new("Vera", "vera@example.com", Role::Validator),
        ];
        let admin = UserModel::new("Root", "root@example.com", Role::Admin);
        let format = FormatModel::new(
            "Carta",
            FormatStatus::Active,
            "Hola {{nombre}}",
            vec![
                VariableDefinition::new("nombre", "text"),
                VariableDefinition::new("nota", "textarea").optional(),
            ],
        );

        store.insert_user(owner.clone());
        store.insert_user(admin);
        for v in &validators {
            store.insert_user(v.clone());
        }
        store.insert_format(format.clone());

        let repos = store.repositories();
        let notifications = NotificationDispatcher::new(repos.notifications.clone(), Duration::days(7));
        Fixture {
            service: CompletionService::new(repos, notifications),
            owner: Requester::new(owner.id, "Ana", "ana@example.com", Role::User),
            store,
            validators,
            format,
        }
    }

    #[tokio::test]
    async fn test_create_is_pending_and_notifies_validators() {
        let f = fixture();
        let created = f
            .service
            .create(
                &f.owner,
                CreateCompletionRequest { format_id: f.format.id, data: data(json!({"nombre": "Ana"})) },
            )
            .await
            .unwrap();

        assert_eq!(created.status, WorkflowStatus::Pending);
        assert_eq!(created.owner_id, f.owner.id);
        for v in &f.validators {
            let inbox = f.store.notifications_for(v.id);
            assert_eq!(inbox.len(), 1);
            assert!(inbox[0].message.contains("\"Carta\""));
            assert!(inbox[0].message.contains("Ana"));
        }
        assert!(f.store.notifications_for(f.owner.id).is_empty());
    }

    #[tokio::test]
    async fn test_create_against_inactive_format_is_invalid_input() {
        let f = fixture();
        let inactive = FormatModel::new("Archivo", FormatStatus::Inactive, "x", vec![]);
        f.store.insert_format(inactive.clone());

        let result = f
            .service
            .create(&f.owner, CreateCompletionRequest { format_id: inactive.id, data: data(json!({})) })
            .await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));

        let result = f
            .service
            .create(&f.owner, CreateCompletionRequest { format_id: Uuid::new_v4(), data: data(json!({})) })
            .await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_requires_declared_variables() {
        let f = fixture();
        let result = f
            .service
            .create(&f.owner, CreateCompletionRequest { format_id: f.format.id, data: data(json!({"nota": "x"})) })
            .await;
        match result {
            Err(ApiError::InvalidInput(message)) => assert!(message.contains("nombre")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_edit_rejected_resets_and_renotifies() {
        let f = fixture();
        let mut completion = CompletionModel::new(f.owner.id, f.format.id, data(json!({"nombre": "Ana"})));
        completion.status = WorkflowStatus::Rejected;
        f.store.insert_completion(completion.clone());

        let updated = f
            .service
            .update(&f.owner, completion.id, UpdateCompletionRequest { data: data(json!({"nombre": "Ana María"})) })
            .await
            .unwrap();

        assert_eq!(updated.status, WorkflowStatus::Pending);
        assert_eq!(f.store.completion(completion.id).unwrap().data.get("nombre"), Some(&json!("Ana María")));
        for v in &f.validators {
            let inbox = f.store.notifications_for(v.id);
            assert_eq!(inbox.len(), 1);
            assert!(inbox[0].message.contains("new validation"));
        }
    }

    #[tokio::test]
    async fn test_edit_pending_does_not_renotify() {
        let f = fixture();
        let completion = CompletionModel::new(f.owner.id, f.format.id, data(json!({"nombre": "Ana"})));
        f.store.insert_completion(completion.clone());

        let updated = f
            .service
            .update(&f.owner, completion.id, UpdateCompletionRequest { data: data(json!({"nombre": "Eva"})) })
            .await
            .unwrap();

        assert_eq!(updated.status, WorkflowStatus::Pending);
        for v in &f.validators {
            assert!(f.store.notifications_for(v.id).is_empty());
        }
    }

    #[tokio::test]
    async fn test_edit_approved_is_invalid_state() {
        let f = fixture();
        let mut completion = CompletionModel::new(f.owner.id, f.format.id, data(json!({"nombre": "Ana"})));
        completion.status = WorkflowStatus::Approved;
        f.store.insert_completion(completion.clone());

        let result = f
            .service
            .update(&f.owner, completion.id, UpdateCompletionRequest { data: data(json!({"nombre": "Eva"})) })
            .await;
        assert!(matches!(result, Err(ApiError::InvalidState(_))));
        assert_eq!(f.store.completion(completion.id).unwrap().status, WorkflowStatus::Approved);
    }

    #[tokio::test]
    async fn test_edit_by_other_user_is_forbidden() {
        let f = fixture();
        let completion = CompletionModel::new(f.owner.id, f.format.id, data(json!({"nombre": "Ana"})));
        f.store.insert_completion(completion.clone());
        let other = Requester::new(Uuid::new_v4(), "Eve", "eve@example.com", Role::Admin);

        let result = f
            .service
            .update(&other, completion.id, UpdateCompletionRequest { data: data(json!({"nombre": "Eva"})) })
            .await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));

        let result = f
            .service
            .update(&f.owner, Uuid::new_v4(), UpdateCompletionRequest { data: data(json!({})) })
            .await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_for_owner_joins_display_fields() {
        let f = fixture();
        f.store.insert_completion(CompletionModel::new(f.owner.id, f.format.id, data(json!({"nombre": "Ana"}))));
        f.store.insert_completion(CompletionModel::new(Uuid::new_v4(), f.format.id, data(json!({}))));

        let views = f.service.list_for_owner(&f.owner).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].format_title.as_deref(), Some("Carta"));
        assert_eq!(views[0].owner.as_ref().map(|o| o.name.as_str()), Some("Ana"));
    }

    #[tokio::test]
    async fn test_failed_fan_out_keeps_completion() {
        let f = fixture();
        f.store.fail_notifications_for(f.validators[0].id);

        let created = f
            .service
            .create(
                &f.owner,
                CreateCompletionRequest { format_id: f.format.id, data: data(json!({"nombre": "Ana"})) },
            )
            .await
            .unwrap();

        assert!(f.store.completion(created.id).is_some());
        assert!(f.store.notifications_for(f.validators[0].id).is_empty());
        assert_eq!(f.store.notifications_for(f.validators[1].id).len(), 1);
    }
}
