//! Ownership-or-role check for entry editing
//!
//! Must be combined with token verification in the access gate; on its own
//! it says nothing about whether the request came from a genuine edit link.

use crate::model::{Actor, Entry};

/// Broad "edit any entry" capability granted by the forms plugin
pub const EDIT_ENTRIES_CAPABILITY: &str = "gravityforms_edit_entries";

/// Full plugin access implies every forms capability
pub const FULL_ACCESS_CAPABILITY: &str = "gform_full_access";

/// Capabilities that allow editing any entry
pub const EDIT_CAPABILITIES: &[&str] = &[EDIT_ENTRIES_CAPABILITY, FULL_ACCESS_CAPABILITY];

/// Visibility level that lets any logged-in user see a field
pub const READ_CAPABILITY: &str = "read";

/// Field id and input type of the edit link column in a view
pub const EDIT_LINK_FIELD: &str = "edit_link";

/// Visibility choices offered for a view field
///
/// The edit link is never offered at plain `read` visibility; other fields
/// keep every choice.
pub fn visibility_options<'a>(
    field_id: &str,
    input_type: &str,
    options: &[&'a str],
) -> Vec<&'a str> {
    let is_edit_link = field_id == EDIT_LINK_FIELD || input_type == EDIT_LINK_FIELD;
    options
        .iter()
        .copied()
        .filter(|cap| !(is_edit_link && *cap == READ_CAPABILITY))
        .collect()
}

/// Whether the actor is the authenticated creator of the entry
pub fn is_entry_owner(actor: &Actor, entry: &Entry) -> bool {
    match actor.id() {
        Some(id) => entry.is_created_by(id),
        None => false,
    }
}

/// Check if an actor may edit a specific entry
///
/// Granted when the view lets creators edit their own entries and the actor
/// is that creator, or when the actor can edit any entry.
pub fn can_edit_entry(actor: &Actor, entry: &Entry, user_edit: bool) -> bool {
    if user_edit && is_entry_owner(actor, entry) {
        return true;
    }

    actor.can_any(EDIT_CAPABILITIES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntryId, EntryStatus, FormId, UserId};

    fn entry_by(created_by: Option<u64>) -> Entry {
        Entry {
            id: EntryId(42),
            form_id: FormId(3),
            created_by: created_by.map(UserId),
            status: EntryStatus::Active,
            values: Vec::new(),
            date_updated: None,
        }
    }

    #[test]
    fn test_owner_with_user_edit() {
        let entry = entry_by(Some(7));
        assert!(can_edit_entry(&Actor::user(7), &entry, true));
    }

    #[test]
    fn test_owner_without_user_edit() {
        let entry = entry_by(Some(7));
        assert!(!can_edit_entry(&Actor::user(7), &entry, false));
    }

    #[test]
    fn test_other_user_denied() {
        let entry = entry_by(Some(7));
        assert!(!can_edit_entry(&Actor::user(9), &entry, true));
    }

    #[test]
    fn test_broad_capability_ignores_ownership() {
        let entry = entry_by(Some(7));
        let editor = Actor::user(9).with_capability(EDIT_ENTRIES_CAPABILITY);
        assert!(can_edit_entry(&editor, &entry, false));

        let admin = Actor::user(1).with_capability(FULL_ACCESS_CAPABILITY);
        assert!(can_edit_entry(&admin, &entry, false));
    }

    #[test]
    fn test_edit_link_never_visible_at_read() {
        let options = ["read", "publish_posts", EDIT_ENTRIES_CAPABILITY];

        assert_eq!(
            visibility_options(EDIT_LINK_FIELD, "", &options),
            vec!["publish_posts", EDIT_ENTRIES_CAPABILITY]
        );
        assert_eq!(
            visibility_options("12", EDIT_LINK_FIELD, &options),
            vec!["publish_posts", EDIT_ENTRIES_CAPABILITY]
        );
        assert_eq!(visibility_options("12", "text", &options), options.to_vec());
    }

    #[test]
    fn test_anonymous_entries_have_no_owner() {
        let entry = entry_by(None);
        assert!(!is_entry_owner(&Actor::user(7), &entry));
        assert!(!is_entry_owner(&Actor::Anonymous, &entry));
        assert!(!can_edit_entry(&Actor::Anonymous, &entry, true));

        let editor = Actor::user(9).with_capability(EDIT_ENTRIES_CAPABILITY);
        assert!(can_edit_entry(&editor, &entry, true));
    }
}
