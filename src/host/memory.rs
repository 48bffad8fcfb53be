//! In-process host
//!
//! Backs the `edit-gate` CLI and the tests. Entries and forms live in
//! concurrent maps; the validator implements the host's required-field and
//! email checks.

use chrono::Utc;
use dashmap::DashMap;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{EntryStore, FormRepository, FormValidator, HostError};
use crate::model::{Entry, EntryId, FieldValue, Form, FormId};
use crate::request::SubmittedValues;
use crate::validation::{FieldValidation, ValidationResult};

/// Entry and form storage held in memory
#[derive(Debug, Default)]
pub struct MemoryHost {
    entries: DashMap<EntryId, Entry>,
    forms: DashMap<FormId, Form>,
    saves: AtomicU64,
    refreshed: DashMap<EntryId, BTreeSet<String>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_entry(&self, entry: Entry) {
        self.entries.insert(entry.id, entry);
    }

    pub fn insert_form(&self, form: Form) {
        self.forms.insert(form.id, form);
    }

    /// Number of save calls made so far
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::Relaxed)
    }

    /// Field ids whose cached value was refreshed for an entry
    pub fn refreshed_fields(&self, entry_id: EntryId) -> BTreeSet<String> {
        self.refreshed
            .get(&entry_id)
            .map(|fields| fields.clone())
            .unwrap_or_default()
    }
}

impl EntryStore for MemoryHost {
    fn get_entry(&self, id: EntryId) -> Result<Option<Entry>, HostError> {
        Ok(self.entries.get(&id).map(|entry| entry.clone()))
    }

    fn save_entry(
        &self,
        form: &Form,
        entry: &Entry,
        values: &SubmittedValues,
    ) -> Result<(), HostError> {
        let mut stored = self
            .entries
            .get_mut(&entry.id)
            .ok_or_else(|| HostError::Storage(format!("entry {} does not exist", entry.id)))?;

        // Only fields that belong to the form are written
        for field in &form.fields {
            let Some(value) = values.fields.get(&field.id) else {
                continue;
            };
            match stored.values.iter_mut().find(|v| v.field_id == field.id) {
                Some(existing) => existing.value = value.clone(),
                None => stored.values.push(FieldValue {
                    field_id: field.id.clone(),
                    value: value.clone(),
                }),
            }
        }
        stored.date_updated = Some(Utc::now());

        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn refresh_field_value(&self, entry_id: EntryId, field_id: &str) -> Result<(), HostError> {
        self.refreshed
            .entry(entry_id)
            .or_default()
            .insert(field_id.to_string());
        Ok(())
    }
}

impl FormRepository for MemoryHost {
    fn get_form(&self, id: FormId) -> Result<Option<Form>, HostError> {
        Ok(self.forms.get(&id).map(|form| form.clone()))
    }
}

/// Required-field and email-format validation
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredFieldValidator;

const REQUIRED_MESSAGE: &str = "This field is required.";
const EMAIL_MESSAGE: &str = "Please enter a valid email address.";

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

impl FormValidator for RequiredFieldValidator {
    fn validate(
        &self,
        form: &Form,
        values: &SubmittedValues,
    ) -> Result<ValidationResult, HostError> {
        let fields = form
            .fields
            .iter()
            .map(|field| {
                let value = values.fields.get(&field.id).map(|v| v.trim()).unwrap_or("");
                let failure = if field.is_required && value.is_empty() {
                    Some(REQUIRED_MESSAGE)
                } else if field.field_type.is_email()
                    && !value.is_empty()
                    && !looks_like_email(value)
                {
                    Some(EMAIL_MESSAGE)
                } else {
                    None
                };

                match failure {
                    Some(message) => {
                        FieldValidation::failed(field.id.clone(), field.field_type.as_str(), message)
                    }
                    None => FieldValidation::passed(field.id.clone(), field.field_type.as_str()),
                }
            })
            .collect();

        Ok(ValidationResult::from_fields(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntryStatus, FormField, UserId};

    fn form() -> Form {
        Form {
            id: FormId(3),
            title: "Listing".to_string(),
            fields: vec![
                FormField::new("1", "text").required(),
                FormField::new("2", "email"),
                FormField::new("3", "post_title").required(),
            ],
        }
    }

    fn entry() -> Entry {
        Entry {
            id: EntryId(42),
            form_id: FormId(3),
            created_by: Some(UserId(7)),
            status: EntryStatus::Active,
            values: vec![FieldValue {
                field_id: "1".to_string(),
                value: "old".to_string(),
            }],
            date_updated: None,
        }
    }

    fn values(pairs: &[(&str, &str)]) -> SubmittedValues {
        SubmittedValues {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_and_email_checks() {
        let result = RequiredFieldValidator
            .validate(&form(), &values(&[("1", " "), ("2", "not-an-email")]))
            .unwrap();

        assert!(!result.is_valid);
        assert_eq!(result.field("1").unwrap().message.as_deref(), Some(REQUIRED_MESSAGE));
        assert_eq!(result.field("2").unwrap().message.as_deref(), Some(EMAIL_MESSAGE));
        assert!(result.field("3").unwrap().failed);
    }

    #[test]
    fn test_valid_submission() {
        let result = RequiredFieldValidator
            .validate(&form(), &values(&[("1", "x"), ("2", "a@b.org"), ("3", "Title")]))
            .unwrap();
        assert!(result.is_valid);
    }

    #[test]
    fn test_save_updates_form_fields_only() {
        let host = MemoryHost::new();
        host.insert_entry(entry());

        let submitted = values(&[("1", "new"), ("2", "a@b.org"), ("99", "x")]);
        host.save_entry(&form(), &entry(), &submitted).unwrap();

        let stored = host.get_entry(EntryId(42)).unwrap().unwrap();
        assert_eq!(stored.value("1"), Some("new"));
        assert_eq!(stored.value("2"), Some("a@b.org"));
        assert_eq!(stored.value("99"), None);
        assert!(stored.date_updated.is_some());
        assert_eq!(host.save_count(), 1);
    }

    #[test]
    fn test_save_missing_entry_fails() {
        let host = MemoryHost::new();
        let result = host.save_entry(&form(), &entry(), &values(&[]));
        assert!(matches!(result, Err(HostError::Storage(_))));
        assert_eq!(host.save_count(), 0);
    }

    #[test]
    fn test_refresh_tracking() {
        let host = MemoryHost::new();
        host.refresh_field_value(EntryId(42), "1").unwrap();
        host.refresh_field_value(EntryId(42), "2").unwrap();
        assert_eq!(host.refreshed_fields(EntryId(42)).len(), 2);
        assert!(host.refreshed_fields(EntryId(1)).is_empty());
    }
}
