use thiserror::Error;
use validator::ValidationErrors;

/// Stable, machine-readable error codes returned alongside every error message.
pub mod error_code {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const INVALID_STATE: &str = "INVALID_STATE";
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const CONFLICT: &str = "CONFLICT";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const DEPENDENCY_FAILURE: &str = "DEPENDENCY_FAILURE";
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Referenced format, completion, validation, notification or user is absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Requester lacks ownership or role for the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The entity's current status disallows the operation.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A document was requested before its completion was approved.
    #[error("Not approved: {0}")]
    NotApproved(String),

    /// Malformed or missing fields, including a missing or inactive format.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A completion already carries a validation, or a unique key is taken.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Store or document converter failure. The message is safe to show to clients.
    #[error("Dependency failure: {0}")]
    DependencyFailure(String),
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => error_code::NOT_FOUND,
            ApiError::Forbidden(_) => error_code::FORBIDDEN,
            ApiError::InvalidState(_) | ApiError::NotApproved(_) => error_code::INVALID_STATE,
            ApiError::InvalidInput(_) => error_code::INVALID_INPUT,
            ApiError::Conflict(_) => error_code::CONFLICT,
            ApiError::Unauthenticated(_) => error_code::UNAUTHENTICATED,
            ApiError::DependencyFailure(_) => error_code::DEPENDENCY_FAILURE,
        }
    }

    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("{entity} '{id}' not found"))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
        fields.sort_unstable();
        ApiError::InvalidInput(format!("invalid fields: {}", fields.join(", ")))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
