//! View settings relevant to editing

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{EntryId, FormId};
use crate::auth::TokenScope;

/// Identifier of the view displaying the entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The view an edit request arrives through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub id: ViewId,
    /// Form whose entries the view displays
    pub form_id: FormId,
    /// Allow entry creators to edit their own entries
    #[serde(default)]
    pub user_edit: bool,
}

impl View {
    pub fn new(id: u64, form_id: u64) -> Self {
        Self {
            id: ViewId(id),
            form_id: FormId(form_id),
            user_edit: false,
        }
    }

    pub fn with_user_edit(mut self, enabled: bool) -> Self {
        self.user_edit = enabled;
        self
    }

    /// Token scope for editing one entry through this view
    pub fn scope_for(&self, entry_id: EntryId) -> TokenScope {
        TokenScope::new(self.id, self.form_id, entry_id)
    }
}
