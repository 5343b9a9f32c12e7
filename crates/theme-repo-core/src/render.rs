//! Rendered theme text and response formatting.

use crate::error::FetchError;
use crate::template::TemplateId;
use serde::Serialize;

/// Indentation used when pretty-printing JSON renders.
const JSON_INDENT: &[u8] = b"    ";

/// A raw response from `GET /themes/{name}?template=...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResponse {
    pub body: String,
    pub content_type: Option<String>,
}

impl RenderResponse {
    pub fn new(body: impl Into<String>, content_type: Option<&str>) -> Self {
        Self {
            body: body.into(),
            content_type: content_type.map(str::to_string),
        }
    }

    /// Turn the body into display text for `template`.
    ///
    /// JSON bodies (the `json` template, or a JSON content type) are parsed
    /// and pretty-printed; anything else is returned verbatim.
    pub fn into_display_text(self, template: &TemplateId) -> Result<String, FetchError> {
        let is_json =
            template.is_json() || self.content_type.as_deref().is_some_and(is_json_content_type);
        if is_json {
            pretty_print_json(&self.body)
        } else {
            Ok(self.body)
        }
    }
}

/// The text currently shown for one (theme, template) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedText {
    pub theme: String,
    pub template: TemplateId,
    pub text: String,
}

impl RenderedText {
    /// Display lines; each line break starts a new line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

/// `application/json`, `application/json; charset=utf-8`, `application/vnd.x+json`
pub fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Pretty-print a JSON document with a fixed four-space indent.
///
/// Key order is kept as received, so the same input always gives the same
/// bytes.
pub fn pretty_print_json(body: &str) -> Result<String, FetchError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let mut out = Vec::with_capacity(body.len() * 2);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| FetchError::parse(e.to_string()))
}
