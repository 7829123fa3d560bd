//! `{{name}}` placeholder substitution.
//!
//! No escaping, no nested templates, no conditionals. Whitespace inside the
//! braces is ignored when looking up the key.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{(.*?)\}\}").expect("placeholder pattern is a valid regex"))
}

/// Replace every placeholder in `content` with the string form of its value
/// in `data`. Absent keys and JSON `null` render as the empty string.
pub fn render(content: &str, data: &Map<String, Value>) -> String {
    placeholder_pattern()
        .replace_all(content, |caps: &Captures| {
            data.get(caps[1].trim()).map(value_to_text).unwrap_or_default()
        })
        .into_owned()
}

/// Distinct placeholder names in order of first appearance.
pub fn extract_placeholders(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in placeholder_pattern().captures_iter(content) {
        let name = caps[1].trim();
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_render_substitutes_and_blanks_missing() {
        let content = "Hola {{nombre}}, edad {{ edad }}, {{ausente}}fin";
        let rendered = render(content, &data(json!({"nombre": "Ana", "edad": 31})));
        assert_eq!(rendered, "Hola Ana, edad 31, fin");
    }

    #[test]
    fn test_render_null_and_bool() {
        let rendered = render("{{a}}|{{b}}", &data(json!({"a": null, "b": true})));
        assert_eq!(rendered, "|true");
    }

    #[test]
    fn test_render_is_stable() {
        let values = data(json!({"x": "v"}));
        let once = render("{{x}}", &values);
        assert_eq!(once, "v");
        assert_eq!(render(&once, &values), once);
    }

    #[test]
    fn test_values_are_not_expanded_recursively() {
        let rendered = render("{{x}}", &data(json!({"x": "{{y}}", "y": "deep"})));
        assert_eq!(rendered, "{{y}}");
    }

    #[test]
    fn test_extract_placeholders() {
        let names = extract_placeholders("{{ b }} {{a}} {{b}} {{}}");
        assert_eq!(names, vec!["b".to_string(), "a".to_string()]);
    }
}
