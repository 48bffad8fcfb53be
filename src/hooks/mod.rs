//! Extension points registered with the host
//!
//! Handlers are collected in a `HookTable` when the service is composed.
//! The table is fixed for the lifetime of the service; nothing is looked up
//! by name at request time.

use std::fmt;
use std::sync::Arc;

use crate::model::{Entry, EntryId, Form, FormId, View};
use crate::request::EditRequest;

/// Host extension points the edit surface takes part in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionPoint {
    /// Access was granted and the editor is about to run
    BeforeEdit,
    /// Host asks whether the current request belongs to the editor
    IsEditRequest,
    /// An edited entry was saved
    AfterSave,
}

impl ExtensionPoint {
    pub const ALL: [ExtensionPoint; 3] = [
        ExtensionPoint::BeforeEdit,
        ExtensionPoint::IsEditRequest,
        ExtensionPoint::AfterSave,
    ];

    /// Name of the extension point on the host side
    pub fn host_name(&self) -> &'static str {
        match self {
            ExtensionPoint::BeforeEdit => "gravityview_edit_entry",
            ExtensionPoint::IsEditRequest => "gravityview_is_edit_entry",
            ExtensionPoint::AfterSave => "gform_after_update_entry",
        }
    }
}

impl fmt::Display for ExtensionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_name())
    }
}

/// Context passed to before-edit handlers
#[derive(Debug, Clone, Copy)]
pub struct BeforeEditContext<'a> {
    pub view: &'a View,
    pub form: &'a Form,
    pub entry: &'a Entry,
}

pub type BeforeEditHandler = Arc<dyn Fn(&BeforeEditContext<'_>) + Send + Sync>;
pub type AfterSaveHandler = Arc<dyn Fn(&Form, EntryId) + Send + Sync>;
/// Receives the current answer and returns the new one
pub type IsEditRequestFilter = Arc<dyn Fn(&EditRequest, bool) -> bool + Send + Sync>;

/// Handlers registered at composition time
#[derive(Clone, Default)]
pub struct HookTable {
    before_edit: Vec<BeforeEditHandler>,
    is_edit_request: Vec<IsEditRequestFilter>,
    after_save: Vec<AfterSaveHandler>,
    after_save_for_form: Vec<(FormId, AfterSaveHandler)>,
}

impl fmt::Debug for HookTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookTable")
            .field("before_edit", &self.before_edit.len())
            .field("is_edit_request", &self.is_edit_request.len())
            .field("after_save", &self.after_save.len())
            .field("after_save_for_form", &self.after_save_for_form.len())
            .finish()
    }
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_before_edit<F>(mut self, handler: F) -> Self
    where
        F: Fn(&BeforeEditContext<'_>) + Send + Sync + 'static,
    {
        self.before_edit.push(Arc::new(handler));
        self
    }

    /// Filter the is-edit-request answer; filters run in registration order
    pub fn on_is_edit_request<F>(mut self, filter: F) -> Self
    where
        F: Fn(&EditRequest, bool) -> bool + Send + Sync + 'static,
    {
        self.is_edit_request.push(Arc::new(filter));
        self
    }

    /// Run after any edited entry is saved
    pub fn on_after_save<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Form, EntryId) + Send + Sync + 'static,
    {
        self.after_save.push(Arc::new(handler));
        self
    }

    /// Run after an entry of one form is saved
    pub fn on_after_save_for_form<F>(mut self, form_id: FormId, handler: F) -> Self
    where
        F: Fn(&Form, EntryId) + Send + Sync + 'static,
    {
        self.after_save_for_form.push((form_id, Arc::new(handler)));
        self
    }

    /// Answer the host's is-edit-request query
    pub fn is_edit_request(&self, request: &EditRequest) -> bool {
        self.is_edit_request
            .iter()
            .fold(request.is_edit_request(), |answer, filter| filter(request, answer))
    }

    pub fn run_before_edit(&self, context: &BeforeEditContext<'_>) {
        for handler in &self.before_edit {
            handler(context);
        }
    }

    /// Generic handlers first, then those bound to the saved form
    pub fn run_after_save(&self, form: &Form, entry_id: EntryId) {
        for handler in &self.after_save {
            handler(form, entry_id);
        }
        for (form_id, handler) in &self.after_save_for_form {
            if *form_id == form.id {
                handler(form, entry_id);
            }
        }
    }

    /// Number of handlers registered for an extension point
    pub fn handler_count(&self, point: ExtensionPoint) -> usize {
        match point {
            ExtensionPoint::BeforeEdit => self.before_edit.len(),
            ExtensionPoint::IsEditRequest => self.is_edit_request.len(),
            ExtensionPoint::AfterSave => self.after_save.len() + self.after_save_for_form.len(),
        }
    }
}
