//! Interfaces consumed from the host forms plugin
//!
//! Entries, forms, validation and persistence all belong to the host. The
//! edit surface only decides when to call them. Host failures are returned
//! as `HostError` and propagate without being reinterpreted.

pub mod memory;

use crate::model::{Entry, EntryId, Form, FormId};
use crate::request::SubmittedValues;
use crate::validation::ValidationResult;

pub use memory::{MemoryHost, RequiredFieldValidator};

/// Errors raised by host calls
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Host storage error: {0}")]
    Storage(String),

    #[error("Host validation error: {0}")]
    Validation(String),
}

/// Entry lookup and persistence
pub trait EntryStore: Send + Sync {
    /// Fetch an entry by id
    fn get_entry(&self, id: EntryId) -> Result<Option<Entry>, HostError>;

    /// Persist submitted values onto an entry
    fn save_entry(
        &self,
        form: &Form,
        entry: &Entry,
        values: &SubmittedValues,
    ) -> Result<(), HostError>;

    /// Drop any cached value the host holds for one field of an entry
    fn refresh_field_value(&self, entry_id: EntryId, field_id: &str) -> Result<(), HostError>;
}

/// Form definition lookup
pub trait FormRepository: Send + Sync {
    fn get_form(&self, id: FormId) -> Result<Option<Form>, HostError>;
}

/// Generic field-level validation
pub trait FormValidator: Send + Sync {
    fn validate(
        &self,
        form: &Form,
        values: &SubmittedValues,
    ) -> Result<ValidationResult, HostError>;
}
