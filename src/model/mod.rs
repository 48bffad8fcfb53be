//! Host data as seen by the edit surface
//!
//! Entries, forms and actors are owned by the host forms plugin. This crate
//! only reads them to decide whether an edit is allowed and valid.

pub mod actor;
pub mod entry;
pub mod form;
pub mod view;

pub use actor::{Actor, UserId};
pub use entry::{Entry, EntryId, EntryStatus, FieldValue};
pub use form::{FieldType, Form, FormField, FormId};
pub use view::{View, ViewId};
