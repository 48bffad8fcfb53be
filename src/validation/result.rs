//! Host validation results

use serde::{Deserialize, Serialize};

use crate::model::FieldType;

/// Per-field validation outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidation {
    pub field_id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub failed: bool,
    /// Failure reason shown next to the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldValidation {
    pub fn passed(field_id: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            field_type: FieldType::new(field_type),
            failed: false,
            message: None,
        }
    }

    pub fn failed(
        field_id: impl Into<String>,
        field_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            field_type: FieldType::new(field_type),
            failed: true,
            message: Some(message.into()),
        }
    }
}

/// Overall verdict plus per-field detail, as produced by the host validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(default)]
    pub fields: Vec<FieldValidation>,
}

impl ValidationResult {
    /// Build a result whose overall flag follows the field flags
    pub fn from_fields(fields: Vec<FieldValidation>) -> Self {
        let is_valid = !fields.iter().any(|f| f.failed);
        Self { is_valid, fields }
    }

    pub fn failing_fields(&self) -> impl Iterator<Item = &FieldValidation> {
        self.fields.iter().filter(|f| f.failed)
    }

    pub fn has_failures(&self) -> bool {
        self.fields.iter().any(|f| f.failed)
    }

    pub fn field(&self, field_id: &str) -> Option<&FieldValidation> {
        self.fields.iter().find(|f| f.field_id == field_id)
    }
}
