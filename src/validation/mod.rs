//! Validation of submitted edits
//!
//! The host validator runs over the whole form, including fields the edit
//! surface cannot change. `ValidationOverride` discounts those failures.

pub mod overrides;
pub mod prepare;
pub mod result;

pub use overrides::{ValidationOverride, POST_FIELD_MARKER};
pub use prepare::prepare_form_for_edit;
pub use result::{FieldValidation, ValidationResult};
