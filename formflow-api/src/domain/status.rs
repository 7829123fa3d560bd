use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// Status shared by completions and validations.
///
/// `pending` is initial. `approved` is terminal. `rejected` returns to
/// `pending` when the owner edits the completion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "workflow_status", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    #[default]
    #[serde(alias = "pendiente")]
    Pending,
    #[serde(alias = "aprobado")]
    Approved,
    #[serde(alias = "rechazado")]
    Rejected,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Pending => "pending",
            WorkflowStatus::Approved => "approved",
            WorkflowStatus::Rejected => "rejected",
        }
    }

    /// Approved or rejected: the outcomes a validator can record.
    pub fn is_decision(&self) -> bool {
        matches!(self, WorkflowStatus::Approved | WorkflowStatus::Rejected)
    }

    /// Whether the owner may still change the submitted data.
    pub fn is_editable(&self) -> bool {
        matches!(self, WorkflowStatus::Pending | WorkflowStatus::Rejected)
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" | "pendiente" => Ok(WorkflowStatus::Pending),
            "approved" | "aprobado" => Ok(WorkflowStatus::Approved),
            "rejected" | "rechazado" => Ok(WorkflowStatus::Rejected),
            other => Err(ApiError::InvalidInput(format!("unknown status '{other}'"))),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(type_name = "format_status", rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum FormatStatus {
    #[default]
    #[serde(alias = "activo")]
    Active,
    #[serde(alias = "inactivo")]
    Inactive,
}

impl FormatStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatStatus::Active => "active",
            FormatStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for FormatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
