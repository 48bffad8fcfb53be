//! Form and view definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host form identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(pub u64);

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field type as named by the host (`text`, `email`, `post_title`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldType(pub String);

impl FieldType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive containment test used for field categories
    pub fn matches_marker(&self, marker: &str) -> bool {
        self.0.to_lowercase().contains(&marker.to_lowercase())
    }

    pub fn is_email(&self) -> bool {
        self.0 == "email"
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A field definition within a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub no_duplicates: Option<bool>,
    #[serde(default)]
    pub admin_only: Option<bool>,
    #[serde(default)]
    pub input_type: Option<String>,
    #[serde(default)]
    pub email_confirm_enabled: bool,
}

impl FormField {
    pub fn new(id: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type: FieldType::new(field_type),
            label: String::new(),
            is_required: false,
            no_duplicates: None,
            admin_only: None,
            input_type: None,
            email_confirm_enabled: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// A form definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: FormId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_match() {
        assert!(FieldType::new("post_title").matches_marker("post_"));
        assert!(FieldType::new("POST_CONTENT").matches_marker("post_"));
        assert!(FieldType::new("post_custom_field").matches_marker("POST_"));
        assert!(!FieldType::new("text").matches_marker("post_"));
        assert!(!FieldType::new("post").matches_marker("post_"));
    }

    #[test]
    fn test_field_deserializes_host_shape() {
        let field: FormField =
            serde_json::from_str(r#"{"id": "1", "type": "email", "is_required": true}"#).unwrap();
        assert!(field.field_type.is_email());
        assert!(field.is_required);
        assert!(field.no_duplicates.is_none());
        assert!(!field.email_confirm_enabled);
    }
}
