use chrono::{DateTime, Utc};
use formflow_api::{FormatStatus, VariableDefinition};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// Database model for a reusable document template.
///
/// `content` holds text with `{{name}}` placeholders. `variables` is the
/// ordered list of inputs a completion is expected to provide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatModel {
    pub id: Uuid,
    pub title: String,
    pub status: FormatStatus,
    pub content: String,
    pub variables: Vec<VariableDefinition>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FormatModel {
    pub fn new(
        title: impl Into<String>,
        status: FormatStatus,
        content: impl Into<String>,
        variables: Vec<VariableDefinition>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            status,
            content: content.into(),
            variables,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == FormatStatus::Active
    }

    /// Names of required variables that `data` does not provide with a usable value.
    pub fn missing_required<'a>(
        &'a self,
        data: &serde_json::Map<String, serde_json::Value>,
    ) -> Vec<&'a str> {
        self.variables
            .iter()
            .filter(|v| v.required)
            .filter(|v| match data.get(&v.name) {
                None | Some(serde_json::Value::Null) => true,
                Some(serde_json::Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .map(|v| v.name.as_str())
            .collect()
    }
}

impl Identifiable for FormatModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_required() {
        let format = FormatModel::new(
            "Carta",
            FormatStatus::Active,
            "{{nombre}} {{fecha}} {{nota}}",
            vec![
                VariableDefinition::new("nombre", "text"),
                VariableDefinition::new("fecha", "date"),
                VariableDefinition::new("nota", "textarea").optional(),
            ],
        );

        let data = json!({"nombre": "Ana", "fecha": "  "});
        let data = data.as_object().unwrap();
        assert_eq!(format.missing_required(data), vec!["fecha"]);

        let data = json!({"nombre": "Ana", "fecha": "2025-01-15"});
        assert!(format.missing_required(data.as_object().unwrap()).is_empty());
    }
}
