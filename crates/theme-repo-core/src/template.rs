//! Template identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the builtin JSON template, also the default selection.
pub const JSON_TEMPLATE: &str = "json";

/// Opaque name of a rendering template (`"json"`, `"xresources"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The builtin JSON template.
    pub fn json() -> Self {
        Self::new(JSON_TEMPLATE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether responses for this template are structured JSON.
    pub fn is_json(&self) -> bool {
        self.0 == JSON_TEMPLATE
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::json()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
