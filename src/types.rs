//! Shared error and outcome types for the edit surface

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::host::HostError;
use crate::model::{EntryId, FormId};

/// Why an edit request did not go through
///
/// Every variant is recoverable by the user; each surfaces as a notice
/// asking them to retry or contact an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditFailure {
    InvalidOrExpiredLink,
    EntryTrashed,
    InsufficientPermission,
    FieldValidationFailed,
}

impl EditFailure {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            EditFailure::InvalidOrExpiredLink => "invalid_or_expired_link",
            EditFailure::EntryTrashed => "entry_trashed",
            EditFailure::InsufficientPermission => "insufficient_permission",
            EditFailure::FieldValidationFailed => "field_validation_failed",
        }
    }

    /// User-facing explanation
    pub fn message(&self) -> &'static str {
        match self {
            EditFailure::InvalidOrExpiredLink => {
                "The link to edit this entry is not valid; it may have expired."
            }
            EditFailure::EntryTrashed => "You cannot edit the entry; it is in the trash.",
            EditFailure::InsufficientPermission => "You do not have permission to edit this entry.",
            EditFailure::FieldValidationFailed => {
                "There was a problem with your submission. Errors have been highlighted below."
            }
        }
    }
}

impl fmt::Display for EditFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors that stop request handling outright
///
/// User-recoverable denials are not errors; they are reported through
/// `EditOutcome`. These cover bad input and failures inside the host.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("Form not found: {0}")]
    FormNotFound(FormId),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Host(#[from] HostError),
}

pub type Result<T> = std::result::Result<T, EditError>;
