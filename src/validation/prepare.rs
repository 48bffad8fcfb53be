//! Form adjustments made before host validation
//!
//! The host validator expects a front-end form, while the edit surface
//! renders the back-end entry editor. The form is adjusted to match what
//! the editor actually shows.

use crate::model::Form;

/// Return a copy of the form ready for validating an edit submission
///
/// - optional field flags the validator reads are made explicit
/// - email confirmation is turned off; the editor has no confirmation input
pub fn prepare_form_for_edit(form: &Form) -> Form {
    let mut form = form.clone();

    for field in &mut form.fields {
        field.no_duplicates.get_or_insert(false);
        field.admin_only.get_or_insert(false);
        if field.input_type.is_none() {
            field.input_type = Some(field.field_type.as_str().to_string());
        }

        if field.field_type.is_email() {
            field.email_confirm_enabled = false;
        }
    }

    form
}
