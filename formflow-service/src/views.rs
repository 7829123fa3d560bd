//! Response shapes joined with display fields from related rows.

use std::collections::{HashMap, HashSet};

use formflow_api::ApiResult;
use formflow_db::models::{CompletionModel, FormatModel, UserModel, ValidationModel};
use serde::Serialize;
use uuid::Uuid;

use crate::error::StoreResultExt;
use crate::Repositories;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&UserModel> for UserSummary {
    fn from(user: &UserModel) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionView {
    #[serde(flatten)]
    pub completion: CompletionModel,
    pub format_title: Option<String>,
    pub owner: Option<UserSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationView {
    #[serde(flatten)]
    pub validation: ValidationModel,
    pub completion: Option<CompletionView>,
    pub validator: Option<UserSummary>,
}

fn distinct(ids: impl IntoIterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

async fn users_by_id(repos: &Repositories, ids: Vec<Uuid>) -> ApiResult<HashMap<Uuid, UserSummary>> {
    let users = repos.users.load_batch(&ids).await.or_dependency_failure("load users")?;
    Ok(users
        .iter()
        .flatten()
        .map(|u| (u.id, UserSummary::from(u)))
        .collect())
}

async fn formats_by_id(repos: &Repositories, ids: Vec<Uuid>) -> ApiResult<HashMap<Uuid, FormatModel>> {
    let formats = repos.formats.load_batch(&ids).await.or_dependency_failure("load formats")?;
    Ok(formats.into_iter().flatten().map(|f| (f.id, f)).collect())
}

/// Attach format title and owner to each completion, keeping input order.
pub async fn completion_views(
    repos: &Repositories,
    completions: Vec<CompletionModel>,
) -> ApiResult<Vec<CompletionView>> {
    let formats = formats_by_id(repos, distinct(completions.iter().map(|c| c.format_id))).await?;
    let owners = users_by_id(repos, distinct(completions.iter().map(|c| c.owner_id))).await?;

    Ok(completions
        .into_iter()
        .map(|completion| CompletionView {
            format_title: formats.get(&completion.format_id).map(|f| f.title.clone()),
            owner: owners.get(&completion.owner_id).cloned(),
            completion,
        })
        .collect())
}

/// Attach the completion view and validator to each validation, keeping input order.
pub async fn validation_views(
    repos: &Repositories,
    validations: Vec<ValidationModel>,
) -> ApiResult<Vec<ValidationView>> {
    let completion_ids = distinct(validations.iter().map(|v| v.completion_id));
    let completions = repos
        .completions
        .load_batch(&completion_ids)
        .await
        .or_dependency_failure("load completions")?;
    let completions: HashMap<Uuid, CompletionView> = completion_views(repos, completions.into_iter().flatten().collect())
        .await?
        .into_iter()
        .map(|view| (view.completion.id, view))
        .collect();
    let validators = users_by_id(repos, distinct(validations.iter().map(|v| v.validator_id))).await?;

    Ok(validations
        .into_iter()
        .map(|validation| ValidationView {
            completion: completions.get(&validation.completion_id).cloned(),
            validator: validators.get(&validation.validator_id).cloned(),
            validation,
        })
        .collect())
}
