//! Fixed HTML shells around rendered format content.

use chrono::{DateTime, Utc};

const STYLE: &str = r#"
    body { font-family: 'Times New Roman', serif; font-size: 12px; line-height: 1.6; margin: 40px; color: #000; }
    .title { font-size: 18px; font-weight: bold; text-align: center; margin-bottom: 30px; }
    .content { text-align: justify; margin-bottom: 30px; }
    .validation { border-top: 1px solid #999; margin-top: 40px; padding-top: 12px; font-size: 11px; }
    .validation p { margin: 4px 0; }
    p { margin-bottom: 12px; }
"#;

/// Identity and decision printed under a validated document.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFooter<'a> {
    pub owner_name: &'a str,
    pub validator_name: &'a str,
    pub decided_at: DateTime<Utc>,
    pub notes: Option<&'a str>,
}

/// Escapes text placed outside the content block.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// `content` is inserted verbatim; it is the rendered format body.
pub fn document_html(title: &str, content: &str) -> String {
    shell(title, content, "")
}

pub fn validated_document_html(title: &str, content: &str, footer: &ValidationFooter<'_>) -> String {
    let notes = footer
        .notes
        .filter(|n| !n.trim().is_empty())
        .map(|n| format!("<p><strong>Notes:</strong> {}</p>", escape_html(n)))
        .unwrap_or_default();

    let block = format!(
        r#"<div class="validation">
      <p><strong>Submitted by:</strong> {owner}</p>
      <p><strong>Approved by:</strong> {validator}</p>
      <p><strong>Date:</strong> {date}</p>
      {notes}
    </div>"#,
        owner = escape_html(footer.owner_name),
        validator = escape_html(footer.validator_name),
        date = footer.decided_at.format("%Y-%m-%d"),
    );

    shell(title, content, &block)
}

fn shell(title: &str, content: &str, footer: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <style>{STYLE}</style>
</head>
<body>
  <div class="title">{title}</div>
  <div class="content">{content}</div>
  {footer}
</body>
</html>
"#,
        title = escape_html(title),
    )
}
