//! Authorization for entry editing
//!
//! Provides:
//! - Edit link tokens bound to one (view, form, entry) tuple
//! - The ownership-or-role permission check and edit link visibility
//! - The access gate combining both with the entry status

pub mod gate;
pub mod permissions;
pub mod token;

pub use gate::{AccessDecision, AccessGate, AccessRequest};
pub use permissions::{
    can_edit_entry, is_entry_owner, visibility_options, EDIT_CAPABILITIES, EDIT_ENTRIES_CAPABILITY,
};
pub use token::{EditToken, EditTokenKey, TokenAction, TokenScope, SUBMISSION_MARKER_ACTION};
