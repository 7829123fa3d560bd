//! Format administration.

use std::collections::HashSet;

use chrono::Utc;
use formflow_api::{
    ApiError, ApiResult, CreateFormatRequest, Requester, UpdateFormatRequest, VariableDefinition,
    ADMIN_ROLES,
};
use formflow_db::models::FormatModel;
use formflow_db::repository::FormatFilter;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::StoreResultExt;
use crate::template::extract_placeholders;
use crate::Repositories;

pub struct FormatService {
    repos: Repositories,
}

impl FormatService {
    pub fn new(repos: Repositories) -> Self {
        Self { repos }
    }

    pub async fn create(&self, requester: &Requester, request: CreateFormatRequest) -> ApiResult<FormatModel> {
        requester.require_any(ADMIN_ROLES, "create formats")?;
        check_request(&request)?;

        let format = FormatModel::new(request.title, request.status, request.content, request.variables);
        let mut saved = self
            .repos
            .formats
            .create_batch(vec![format])
            .await
            .or_dependency_failure("create format")?;
        let format = saved
            .pop()
            .ok_or_else(|| ApiError::DependencyFailure("create format returned nothing".into()))?;

        info!(format_id = %format.id, title = %format.title, "format created");
        Ok(format)
    }

    pub async fn list(&self, filter: &FormatFilter) -> ApiResult<Vec<FormatModel>> {
        self.repos
            .formats
            .find_by_filter(filter)
            .await
            .or_dependency_failure("list formats")
    }

    pub async fn get(&self, id: Uuid) -> ApiResult<FormatModel> {
        self.repos
            .formats
            .load(id)
            .await
            .or_dependency_failure("load format")?
            .ok_or_else(|| ApiError::not_found("format", id))
    }

    /// Replace every editable field of a format.
    pub async fn update(
        &self,
        requester: &Requester,
        id: Uuid,
        request: UpdateFormatRequest,
    ) -> ApiResult<FormatModel> {
        requester.require_any(ADMIN_ROLES, "update formats")?;
        check_request(&request)?;

        let mut format = self.get(id).await?;
        format.title = request.title;
        format.status = request.status;
        format.content = request.content;
        format.variables = request.variables;
        format.updated_at = Utc::now();

        let mut saved = self
            .repos
            .formats
            .update_batch(vec![format])
            .await
            .or_dependency_failure("update format")?;
        let format = saved
            .pop()
            .ok_or_else(|| ApiError::DependencyFailure("update format returned nothing".into()))?;

        info!(format_id = %format.id, status = %format.status, "format updated");
        Ok(format)
    }

    /// Delete a format. Its completions and their validations go with it.
    pub async fn delete(&self, requester: &Requester, id: Uuid) -> ApiResult<()> {
        requester.require_any(ADMIN_ROLES, "delete formats")?;
        let deleted = self
            .repos
            .formats
            .delete_batch(&[id])
            .await
            .or_dependency_failure("delete format")?;
        if deleted == 0 {
            return Err(ApiError::not_found("format", id));
        }
        info!(format_id = %id, "format deleted");
        Ok(())
    }
}

fn check_request(request: &CreateFormatRequest) -> ApiResult<()> {
    request.validate()?;
    check_variables(&request.variables)?;

    let declared: HashSet<&str> = request.variables.iter().map(|v| v.name.as_str()).collect();
    let undeclared: Vec<String> = extract_placeholders(&request.content)
        .into_iter()
        .filter(|name| !declared.contains(name.as_str()))
        .collect();
    if !undeclared.is_empty() {
        warn!(title = %request.title, ?undeclared, "placeholders without a declared variable render empty");
    }
    Ok(())
}

fn check_variables(variables: &[VariableDefinition]) -> ApiResult<()> {
    let mut seen = HashSet::new();
    for variable in variables {
        let name = variable.name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("variable names must not be empty".into()));
        }
        if !seen.insert(name) {
            return Err(ApiError::InvalidInput(format!("variable '{name}' is declared twice")));
        }
    }
    Ok(())
}
