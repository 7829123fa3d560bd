//! Request bodies accepted by the workflow operations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::domain::role::Role;
use crate::domain::status::{FormatStatus, WorkflowStatus};
use crate::domain::variable::VariableDefinition;

/// Submitted values keyed by variable name.
pub type CompletionData = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFormatRequest {
    #[serde(alias = "titulo")]
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[serde(default, alias = "estado")]
    pub status: FormatStatus,

    #[serde(alias = "contenido")]
    pub content: String,

    #[serde(default)]
    pub variables: Vec<VariableDefinition>,
}

pub type UpdateFormatRequest = CreateFormatRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCompletionRequest {
    #[serde(alias = "formatId")]
    pub format_id: Uuid,

    #[serde(alias = "datos")]
    pub data: CompletionData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCompletionRequest {
    #[serde(alias = "datos")]
    pub data: CompletionData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateValidationRequest {
    #[serde(alias = "completionId")]
    pub completion_id: Uuid,

    #[serde(alias = "estado")]
    pub status: WorkflowStatus,

    #[serde(default, alias = "observaciones")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateValidationRequest {
    #[serde(alias = "estado")]
    pub status: WorkflowStatus,

    #[serde(default, alias = "observaciones", alias = "comentarios")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}
