//! Access gate for edit requests
//!
//! Checks run in a fixed order and the first failure is the one reported:
//!
//! 1. entry not in the trash, whatever the token
//! 2. token bound to the exact (view, form, entry) tuple
//! 3. owner self-edit or broad edit capability

use tracing::warn;

use super::permissions::can_edit_entry;
use super::token::{EditToken, EditTokenKey};
use crate::model::{Actor, Entry, View};
use crate::types::EditFailure;

/// Everything the gate looks at for one request
#[derive(Debug, Clone, Copy)]
pub struct AccessRequest<'a> {
    pub actor: &'a Actor,
    pub token: Option<&'a EditToken>,
    pub entry: &'a Entry,
    pub view: &'a View,
}

/// Gate verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Denied(EditFailure),
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }

    pub fn failure(&self) -> Option<EditFailure> {
        match self {
            AccessDecision::Granted => None,
            AccessDecision::Denied(failure) => Some(*failure),
        }
    }
}

/// Authorization decision for edit requests
#[derive(Debug, Clone, Copy)]
pub struct AccessGate<'k> {
    key: &'k EditTokenKey,
}

impl<'k> AccessGate<'k> {
    pub fn new(key: &'k EditTokenKey) -> Self {
        Self { key }
    }

    pub fn evaluate(&self, request: &AccessRequest<'_>) -> AccessDecision {
        match self.first_failure(request) {
            None => AccessDecision::Granted,
            Some(failure) => {
                warn!(
                    reason = failure.code(),
                    view_id = %request.view.id,
                    entry_id = %request.entry.id,
                    actor = %request.actor,
                    "Edit entry denied: {}",
                    failure.message()
                );
                AccessDecision::Denied(failure)
            }
        }
    }

    fn first_failure(&self, request: &AccessRequest<'_>) -> Option<EditFailure> {
        if request.entry.status.is_trashed() {
            return Some(EditFailure::EntryTrashed);
        }

        let scope = request.view.scope_for(request.entry.id);
        let token_ok = request
            .token
            .is_some_and(|token| self.key.verify_for_entry(scope, token));
        if !token_ok {
            return Some(EditFailure::InvalidOrExpiredLink);
        }

        if !can_edit_entry(request.actor, request.entry, request.view.user_edit) {
            return Some(EditFailure::InsufficientPermission);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::permissions::EDIT_ENTRIES_CAPABILITY;
    use crate::model::{EntryId, EntryStatus, FormId, UserId};

    fn key() -> EditTokenKey {
        EditTokenKey::new(b"gate-secret").unwrap()
    }

    fn entry(status: EntryStatus) -> Entry {
        Entry {
            id: EntryId(42),
            form_id: FormId(3),
            created_by: Some(UserId(7)),
            status,
            values: Vec::new(),
            date_updated: None,
        }
    }

    fn evaluate(
        key: &EditTokenKey,
        actor: &Actor,
        token: Option<&EditToken>,
        entry: &Entry,
        view: &View,
    ) -> AccessDecision {
        AccessGate::new(key).evaluate(&AccessRequest {
            actor,
            token,
            entry,
            view,
        })
    }

    #[test]
    fn test_owner_with_self_edit_granted() {
        let key = key();
        let view = View::new(10, 3).with_user_edit(true);
        let entry = entry(EntryStatus::Active);
        let token = key.mint_for_entry(view.scope_for(entry.id));

        let decision = evaluate(&key, &Actor::user(7), Some(&token), &entry, &view);
        assert_eq!(decision, AccessDecision::Granted);
        assert!(decision.is_granted());
    }

    #[test]
    fn test_other_user_without_capability_denied() {
        let key = key();
        let view = View::new(10, 3).with_user_edit(true);
        let entry = entry(EntryStatus::Active);
        let token = key.mint_for_entry(view.scope_for(entry.id));

        let decision = evaluate(&key, &Actor::user(9), Some(&token), &entry, &view);
        assert_eq!(decision, AccessDecision::Denied(EditFailure::InsufficientPermission));
    }

    #[test]
    fn test_trashed_entry_denied_for_editor() {
        let key = key();
        let view = View::new(10, 3);
        let entry = entry(EntryStatus::Trash);
        let token = key.mint_for_entry(view.scope_for(entry.id));
        let editor = Actor::user(1).with_capability(EDIT_ENTRIES_CAPABILITY);

        let decision = evaluate(&key, &editor, Some(&token), &entry, &view);
        assert_eq!(decision, AccessDecision::Denied(EditFailure::EntryTrashed));
    }

    #[test]
    fn test_editor_granted_regardless_of_ownership() {
        let key = key();
        let view = View::new(10, 3);
        let entry = entry(EntryStatus::Active);
        let token = key.mint_for_entry(view.scope_for(entry.id));
        let editor = Actor::user(99).with_capability(EDIT_ENTRIES_CAPABILITY);

        assert!(evaluate(&key, &editor, Some(&token), &entry, &view).is_granted());
    }

    #[test]
    fn test_trash_reported_when_every_check_fails() {
        let key = key();
        let view = View::new(10, 3);
        let entry = entry(EntryStatus::Trash);

        let decision = evaluate(&key, &Actor::Anonymous, None, &entry, &view);
        assert_eq!(decision.failure(), Some(EditFailure::EntryTrashed));
    }

    #[test]
    fn test_trashed_entry_with_forged_token_denied_as_trashed() {
        let key = key();
        let view = View::new(10, 3);
        let entry = entry(EntryStatus::Trash);
        let editor = Actor::user(1).with_capability(EDIT_ENTRIES_CAPABILITY);
        let forged = EditToken::new("deadbeef");

        let decision = evaluate(&key, &editor, Some(&forged), &entry, &view);
        assert_eq!(decision, AccessDecision::Denied(EditFailure::EntryTrashed));
    }

    #[test]
    fn test_token_checked_before_permission() {
        let key = key();
        let view = View::new(10, 3);
        let entry = entry(EntryStatus::Active);

        let decision = evaluate(&key, &Actor::Anonymous, None, &entry, &view);
        assert_eq!(decision.failure(), Some(EditFailure::InvalidOrExpiredLink));
    }

    #[test]
    fn test_token_for_other_entry_denied() {
        let key = key();
        let view = View::new(10, 3).with_user_edit(true);
        let entry = entry(EntryStatus::Active);
        let other = key.mint_for_entry(view.scope_for(EntryId(43)));

        let decision = evaluate(&key, &Actor::user(7), Some(&other), &entry, &view);
        assert_eq!(decision, AccessDecision::Denied(EditFailure::InvalidOrExpiredLink));
    }

    #[test]
    fn test_token_for_other_view_denied() {
        let key = key();
        let view = View::new(10, 3);
        let entry = entry(EntryStatus::Active);
        let token = key.mint_for_entry(View::new(11, 3).scope_for(entry.id));
        let editor = Actor::user(1).with_capability(EDIT_ENTRIES_CAPABILITY);

        let decision = evaluate(&key, &editor, Some(&token), &entry, &view);
        assert_eq!(decision.failure(), Some(EditFailure::InvalidOrExpiredLink));
    }

    #[test]
    fn test_trash_checked_before_permission() {
        let key = key();
        let view = View::new(10, 3);
        let entry = entry(EntryStatus::Trash);
        let token = key.mint_for_entry(view.scope_for(entry.id));

        let decision = evaluate(&key, &Actor::Anonymous, Some(&token), &entry, &view);
        assert_eq!(decision.failure(), Some(EditFailure::EntryTrashed));
    }
}
