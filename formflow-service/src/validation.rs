//! Validator decisions on completions.

use chrono::Utc;
use formflow_api::{
    ApiError, ApiResult, CreateValidationRequest, Requester, Role, UpdateValidationRequest,
    WorkflowStatus, REVIEWER_ROLES,
};
use formflow_db::models::ValidationModel;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::StoreResultExt;
use crate::notification::NotificationDispatcher;
use crate::views::{completion_views, validation_views, CompletionView, ValidationView};
use crate::Repositories;

const DECIDED: &[WorkflowStatus] = &[WorkflowStatus::Approved, WorkflowStatus::Rejected];

pub struct ValidationService {
    repos: Repositories,
    notifications: NotificationDispatcher,
}

impl ValidationService {
    pub fn new(repos: Repositories, notifications: NotificationDispatcher) -> Self {
        Self {
            repos,
            notifications,
        }
    }

    /// Record a decision on a completion and copy it onto the completion.
    ///
    /// Only `approved` and `rejected` are accepted. A completion carries at
    /// most one validation; the store enforces it, the lookup here only gives
    /// the common case a clearer message.
    pub async fn create(&self, requester: &Requester, request: CreateValidationRequest) -> ApiResult<ValidationModel> {
        requester.require_any(REVIEWER_ROLES, "validate completions")?;
        if !request.status.is_decision() {
            return Err(ApiError::InvalidInput(format!(
                "a validation must be approved or rejected, not {}",
                request.status
            )));
        }

        let completion = self
            .repos
            .completions
            .load(request.completion_id)
            .await
            .or_dependency_failure("load completion")?
            .ok_or_else(|| ApiError::not_found("completion", request.completion_id))?;

        let existing = self
            .repos
            .validations
            .find_by_completion_id(completion.id)
            .await
            .or_dependency_failure("load validation")?;
        if existing.is_some() {
            return Err(ApiError::Conflict(format!(
                "completion {} has already been validated",
                completion.id
            )));
        }

        let validation = ValidationModel::new(completion.id, requester.id, request.status, request.notes);
        let validation = self
            .repos
            .validations
            .create_decision(validation)
            .await
            .or_dependency_failure("create validation")?;

        info!(
            validation_id = %validation.id,
            completion_id = %completion.id,
            status = %validation.status,
            validator = %requester.id,
            "completion decided"
        );

        let title = match self.repos.formats.load(completion.format_id).await {
            Ok(Some(format)) => format.title,
            Ok(None) => completion.format_id.to_string(),
            Err(err) => {
                warn!(error = %err, format_id = %completion.format_id, "could not load format for notification");
                completion.format_id.to_string()
            }
        };
        let owner_name = match self.repos.users.load(completion.owner_id).await {
            Ok(Some(owner)) => owner.name,
            Ok(None) => completion.owner_id.to_string(),
            Err(err) => {
                warn!(error = %err, owner = %completion.owner_id, "could not load owner for notification");
                completion.owner_id.to_string()
            }
        };

        let status = validation.status.as_str();
        self.notify_best_effort(
            completion.owner_id,
            format!("Your format \"{title}\" was {status} by validator {}", requester.name),
        )
        .await;
        self.notify_best_effort(
            requester.id,
            format!("You {status} the format \"{title}\" from {owner_name}"),
        )
        .await;

        Ok(validation)
    }

    /// Admins see every validation, anyone else only the ones they recorded.
    pub async fn list(&self, requester: &Requester) -> ApiResult<Vec<ValidationView>> {
        let validations = if requester.role == Role::Admin {
            self.repos.validations.find_all().await
        } else {
            self.repos.validations.find_by_validator_id(requester.id).await
        }
        .or_dependency_failure("list validations")?;
        validation_views(&self.repos, validations).await
    }

    /// Completions with no validation row yet, oldest first.
    pub async fn pending(&self, requester: &Requester) -> ApiResult<Vec<CompletionView>> {
        requester.require_any(REVIEWER_ROLES, "list pending validations")?;
        let completions = self
            .repos
            .completions
            .find_without_validation()
            .await
            .or_dependency_failure("list pending completions")?;
        completion_views(&self.repos, completions).await
    }

    /// Decided validations, most recently updated first.
    pub async fn completed(&self, requester: &Requester) -> ApiResult<Vec<ValidationView>> {
        requester.require_any(REVIEWER_ROLES, "list completed validations")?;
        let validations = self
            .repos
            .validations
            .find_by_statuses(DECIDED)
            .await
            .or_dependency_failure("list completed validations")?;
        validation_views(&self.repos, validations).await
    }

    pub async fn get_by_completion(&self, completion_id: Uuid) -> ApiResult<ValidationModel> {
        self.repos
            .validations
            .find_by_completion_id(completion_id)
            .await
            .or_dependency_failure("load validation")?
            .ok_or_else(|| ApiError::NotFound(format!("no validation for completion '{completion_id}'")))
    }

    /// Change a recorded decision. Notes are kept unless new ones are sent.
    pub async fn update(
        &self,
        requester: &Requester,
        id: Uuid,
        request: UpdateValidationRequest,
    ) -> ApiResult<ValidationModel> {
        requester.require_any(REVIEWER_ROLES, "update validations")?;

        let mut validation = self
            .repos
            .validations
            .load(id)
            .await
            .or_dependency_failure("load validation")?
            .ok_or_else(|| ApiError::not_found("validation", id))?;

        validation.status = request.status;
        if let Some(notes) = request.notes {
            validation.notes = Some(notes);
        }
        validation.updated_at = Utc::now();

        let validation = self
            .repos
            .validations
            .update_decision(validation)
            .await
            .or_dependency_failure("update validation")?;

        info!(validation_id = %validation.id, status = %validation.status, "validation updated");
        Ok(validation)
    }

    async fn notify_best_effort(&self, user_id: Uuid, message: String) {
        if let Err(err) = self.notifications.notify(user_id, message).await {
            warn!(error = %err, user_id = %user_id, "decision notification was not stored");
        }
    }
}
