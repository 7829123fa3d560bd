use formflow_api::{FormatStatus, Role, VariableDefinition, WorkflowStatus};
use formflow_db::models::{CompletionModel, FormatModel, UserModel, ValidationModel};
use serde_json::json;
use uuid::Uuid;

pub fn create_test_user(name: &str, role: Role) -> UserModel {
    let email = format!("{}.{}@example.com", name.to_lowercase(), Uuid::new_v4().simple());
    UserModel::new(name, email, role)
}

pub fn create_test_format(title: &str) -> FormatModel {
    FormatModel::new(
        title,
        FormatStatus::Active,
        "Hola {{nombre}}",
        vec![VariableDefinition::new("nombre", "text")],
    )
}

pub fn create_test_completion(owner_id: Uuid, format_id: Uuid) -> CompletionModel {
    let data = json!({"nombre": "Ana"});
    CompletionModel::new(owner_id, format_id, data.as_object().cloned().unwrap_or_default())
}

pub fn create_test_validation(
    completion_id: Uuid,
    validator_id: Uuid,
    status: WorkflowStatus,
) -> ValidationModel {
    ValidationModel::new(completion_id, validator_id, status, Some("ok".to_string()))
}
