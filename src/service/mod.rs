//! Edit request handling
//!
//! Runs the access gate, then host validation adjusted by the validation
//! override, and issues at most one host save per request. All per-request
//! state lives in `EditContext`; the service itself holds only the
//! composition-time collaborators.

pub mod outcome;

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::{
    AccessDecision, AccessGate, AccessRequest, EditToken, EditTokenKey, TokenAction,
};
use crate::hooks::{BeforeEditContext, HookTable};
use crate::host::{EntryStore, FormRepository, FormValidator};
use crate::model::{Actor, Entry, EntryId, Form, View};
use crate::notice::Notice;
use crate::request::{back_link, edit_link, EditRequest};
use crate::types::{EditError, EditFailure, Result};
use crate::validation::{prepare_form_for_edit, ValidationOverride};

pub use outcome::{EditOutcome, FormTokens};

/// Request-scoped inputs
#[derive(Debug, Clone, Copy)]
pub struct EditContext<'a> {
    pub view: &'a View,
    pub entry_id: EntryId,
    pub actor: &'a Actor,
    /// URL of the page being edited, used to build the return link
    pub page_url: &'a str,
}

/// Entry editing wired to a host
pub struct EditService {
    key: EditTokenKey,
    entries: Arc<dyn EntryStore>,
    forms: Arc<dyn FormRepository>,
    validator: Arc<dyn FormValidator>,
    policy: ValidationOverride,
    hooks: HookTable,
}

impl EditService {
    pub fn new(
        key: EditTokenKey,
        entries: Arc<dyn EntryStore>,
        forms: Arc<dyn FormRepository>,
        validator: Arc<dyn FormValidator>,
    ) -> Self {
        Self {
            key,
            entries,
            forms,
            validator,
            policy: ValidationOverride::default(),
            hooks: HookTable::default(),
        }
    }

    pub fn with_override(mut self, policy: ValidationOverride) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_hooks(mut self, hooks: HookTable) -> Self {
        self.hooks = hooks;
        self
    }

    /// Build the edit link for an entry shown in a view
    pub fn edit_link(&self, view: &View, entry_id: EntryId, entry_link: &str) -> Result<String> {
        let token = self.key.mint_for_entry(view.scope_for(entry_id));
        edit_link(entry_link, &token)
    }

    /// Whether a request is an edit form submission the host should leave
    /// alone rather than process as a regular form post
    pub fn claims_submission(&self, request: &EditRequest) -> bool {
        request
            .submission_marker
            .as_ref()
            .is_some_and(|marker| self.key.verify(&TokenAction::SubmissionMarker, marker))
    }

    fn form_tokens(&self, view: &View, entry_id: EntryId) -> FormTokens {
        let scope = view.scope_for(entry_id);
        FormTokens {
            field_name: scope.action_key(),
            token: self.key.mint_for_entry(scope),
            submission_marker: self.key.mint(&TokenAction::SubmissionMarker),
        }
    }

    fn load(&self, ctx: &EditContext<'_>) -> Result<(Entry, Form)> {
        let entry = self
            .entries
            .get_entry(ctx.entry_id)?
            .ok_or(EditError::EntryNotFound(ctx.entry_id))?;
        let form = self
            .forms
            .get_form(ctx.view.form_id)?
            .ok_or(EditError::FormNotFound(ctx.view.form_id))?;
        Ok((entry, form))
    }

    fn deny(failure: EditFailure) -> EditOutcome {
        EditOutcome::Denied {
            failure,
            notice: Notice::failure(failure),
        }
    }

    /// Handle one edit request
    pub fn handle(&self, ctx: &EditContext<'_>, request: &EditRequest) -> Result<EditOutcome> {
        let (entry, form) = self.load(ctx)?;

        if !self.hooks.is_edit_request(request) {
            return Err(EditError::InvalidRequest(
                "Not an edit entry request".to_string(),
            ));
        }

        if let Some(submitted_id) = request.entry_id {
            if submitted_id != entry.id {
                warn!(
                    submitted = %submitted_id,
                    expected = %entry.id,
                    "Edit submission names a different entry"
                );
                return Ok(Self::deny(EditFailure::InvalidOrExpiredLink));
            }
        }

        let scope = ctx.view.scope_for(entry.id);
        let gate = AccessGate::new(&self.key);
        let decision = gate.evaluate(&AccessRequest {
            actor: ctx.actor,
            token: request.token_for(&scope),
            entry: &entry,
            view: ctx.view,
        });
        if let AccessDecision::Denied(failure) = decision {
            return Ok(Self::deny(failure));
        }

        self.hooks.run_before_edit(&BeforeEditContext {
            view: ctx.view,
            form: &form,
            entry: &entry,
        });

        let tokens = self.form_tokens(ctx.view, entry.id);
        if !request.is_submission() {
            return Ok(EditOutcome::Display {
                entry,
                form,
                tokens,
            });
        }

        self.save(ctx, request, entry, form, tokens)
    }

    fn save(
        &self,
        ctx: &EditContext<'_>,
        request: &EditRequest,
        entry: Entry,
        form: Form,
        tokens: FormTokens,
    ) -> Result<EditOutcome> {
        let prepared = prepare_form_for_edit(&form);
        let host_result = self.validator.validate(&prepared, &request.values)?;
        let validation = self.policy.apply(host_result);

        if !validation.is_valid {
            info!(
                entry_id = %entry.id,
                failed_fields = validation.failing_fields().count(),
                "Edit submission failed validation"
            );
            return Ok(EditOutcome::Rejected {
                entry,
                form,
                validation,
                tokens,
                notice: Notice::failure(EditFailure::FieldValidationFailed),
            });
        }

        debug!(entry_id = %entry.id, "Submission is valid");

        self.entries.save_entry(&form, &entry, &request.values)?;
        self.hooks.run_after_save(&form, entry.id);

        // The host caches field values; drop them before reading back
        for field in &form.fields {
            self.entries.refresh_field_value(entry.id, &field.id)?;
        }
        let saved = self
            .entries
            .get_entry(entry.id)?
            .ok_or(EditError::EntryNotFound(entry.id))?;

        let return_url = back_link(ctx.page_url)?;
        info!(entry_id = %saved.id, view_id = %ctx.view.id, "Entry updated");

        Ok(EditOutcome::Saved {
            entry: saved,
            notice: Notice::updated(return_url.clone()),
            return_url,
        })
    }

    /// Token for the tuple, as embedded in edit links
    pub fn token_for(&self, view: &View, entry_id: EntryId) -> EditToken {
        self.key.mint_for_entry(view.scope_for(entry_id))
    }
}
