//! Submitted form entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{FormId, UserId};

/// Unique entry identifier assigned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Active,
    Spam,
    #[serde(alias = "trashed")]
    Trash,
}

impl EntryStatus {
    pub fn is_trashed(&self) -> bool {
        matches!(self, EntryStatus::Trash)
    }
}

/// A single stored field value, keyed by the form field id (`"3"`, `"5.2"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    pub field_id: String,
    pub value: String,
}

/// A submitted form record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub form_id: FormId,
    /// Creator identity; absent for anonymous submissions
    #[serde(default)]
    pub created_by: Option<UserId>,
    #[serde(default)]
    pub status: EntryStatus,
    /// Field values in form order
    #[serde(default)]
    pub values: Vec<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<DateTime<Utc>>,
}

impl Entry {
    /// Look up the stored value for a field
    pub fn value(&self, field_id: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.field_id == field_id)
            .map(|v| v.value.as_str())
    }

    /// Whether the given user created this entry
    pub fn is_created_by(&self, user: UserId) -> bool {
        self.created_by == Some(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accepts_trashed_alias() {
        let status: EntryStatus = serde_json::from_str("\"trashed\"").unwrap();
        assert!(status.is_trashed());

        let status: EntryStatus = serde_json::from_str("\"trash\"").unwrap();
        assert_eq!(status, EntryStatus::Trash);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"trash\"");
    }

    #[test]
    fn test_entry_defaults() {
        let entry: Entry = serde_json::from_str(r#"{"id": 42, "form_id": 3}"#).unwrap();
        assert_eq!(entry.id, EntryId(42));
        assert_eq!(entry.status, EntryStatus::Active);
        assert!(entry.created_by.is_none());
        assert!(entry.values.is_empty());
    }

    #[test]
    fn test_value_lookup() {
        let entry = Entry {
            id: EntryId(1),
            form_id: FormId(1),
            created_by: Some(UserId(7)),
            status: EntryStatus::Active,
            values: vec![FieldValue {
                field_id: "2".to_string(),
                value: "hello".to_string(),
            }],
            date_updated: None,
        };

        assert_eq!(entry.value("2"), Some("hello"));
        assert_eq!(entry.value("3"), None);
        assert!(entry.is_created_by(UserId(7)));
        assert!(!entry.is_created_by(UserId(9)));
    }
}
