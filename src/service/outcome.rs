//! Result of handling one edit request

use serde::Serialize;

use crate::auth::EditToken;
use crate::model::{Entry, Form};
use crate::notice::Notice;
use crate::types::EditFailure;
use crate::validation::ValidationResult;

/// Tokens the edit form must carry back on submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormTokens {
    /// Name of the form field carrying the entry token
    pub field_name: String,
    pub token: EditToken,
    /// Value for the `is_gv_edit_entry` field
    pub submission_marker: EditToken,
}

/// What the caller should do with the request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EditOutcome {
    /// Access gate refused; show the notice instead of the form
    Denied { failure: EditFailure, notice: Notice },
    /// Show the edit form
    Display {
        entry: Entry,
        form: Form,
        tokens: FormTokens,
    },
    /// Submission failed validation; show the form again with field errors
    Rejected {
        entry: Entry,
        form: Form,
        validation: ValidationResult,
        tokens: FormTokens,
        notice: Notice,
    },
    /// Submission saved; `entry` is the reloaded record
    Saved {
        entry: Entry,
        return_url: String,
        notice: Notice,
    },
}

impl EditOutcome {
    pub fn failure(&self) -> Option<EditFailure> {
        match self {
            EditOutcome::Denied { failure, .. } => Some(*failure),
            EditOutcome::Rejected { .. } => Some(EditFailure::FieldValidationFailed),
            EditOutcome::Display { .. } | EditOutcome::Saved { .. } => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            EditOutcome::Denied { notice, .. }
            | EditOutcome::Rejected { notice, .. }
            | EditOutcome::Saved { notice, .. } => Some(notice),
            EditOutcome::Display { .. } => None,
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, EditOutcome::Saved { .. })
    }
}
