use serde::{Deserialize, Serialize};

/// A named input a format expects, rendered as a form field by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDefinition {
    #[serde(alias = "nombre")]
    pub name: String,

    /// Input kind hint such as `text`, `number`, `date` or `textarea`.
    #[serde(rename = "type", alias = "tipo", default = "default_kind")]
    pub kind: String,

    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_kind() -> String {
    "text".to_string()
}

fn default_required() -> bool {
    true
}

impl VariableDefinition {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            required: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}
