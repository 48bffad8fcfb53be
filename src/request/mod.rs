//! Inbound edit requests
//!
//! The query string and form body are parsed once, at the boundary, into an
//! `EditRequest`. Nothing downstream reads raw request parameters.

pub mod links;

use serde_json::Value;
use std::collections::BTreeMap;

use crate::auth::{EditToken, TokenScope, SUBMISSION_MARKER_ACTION};
use crate::model::EntryId;
use crate::types::{EditError, Result};

pub use links::{back_link, edit_link, EDIT_LINK_PARAMS};

/// `action` value of a submitted edit form
pub const ACTION_UPDATE: &str = "update";

/// `view` query value of the entry editor
pub const VIEW_ENTRY: &str = "entry";

/// `page` query value the host expects alongside `view=entry`
pub const PAGE_ENTRIES: &str = "gf_entries";

/// Prefix of submitted field inputs (`input_3`, `input_5.2`)
const INPUT_PREFIX: &str = "input_";

/// Field values and uploads handed to the host validator and save call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmittedValues {
    /// Field id to submitted value
    pub fields: BTreeMap<String, String>,
    /// Files already uploaded to the host's temp folder, keyed by input name
    pub uploaded_files: BTreeMap<String, Value>,
}

/// A parsed edit request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditRequest {
    /// `view` query parameter
    pub view: Option<String>,
    /// `page` query parameter
    pub page: Option<String>,
    /// `edit` query parameter carrying the edit link token
    pub edit_token: Option<EditToken>,
    /// `action` body parameter
    pub action: Option<String>,
    /// `lid` body parameter naming the entry being saved
    pub entry_id: Option<EntryId>,
    /// `is_gv_edit_entry` body parameter
    pub submission_marker: Option<EditToken>,
    /// Tokens submitted under their tuple-named field (`edit_{view}_{form}_{entry}`)
    scoped_tokens: BTreeMap<String, EditToken>,
    pub values: SubmittedValues,
}

fn parse_pairs(input: &str) -> Result<Vec<(String, String)>> {
    serde_urlencoded::from_str(input)
        .map_err(|e| EditError::InvalidRequest(format!("Invalid parameters: {e}")))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl EditRequest {
    /// Parse a request from its query string and optional urlencoded body
    pub fn parse(query: &str, body: Option<&str>) -> Result<Self> {
        let mut request = EditRequest::default();

        for (name, value) in parse_pairs(query.trim_start_matches('?'))? {
            match name.as_str() {
                "view" => request.view = Some(value),
                "page" => request.page = Some(value),
                "edit" => request.edit_token = non_empty(value).map(EditToken::new),
                _ => {}
            }
        }

        let Some(body) = body else {
            return Ok(request);
        };

        for (name, value) in parse_pairs(body)? {
            match name.as_str() {
                "action" => request.action = Some(value),
                "lid" => {
                    let id = value.trim().parse::<u64>().map_err(|_| {
                        EditError::InvalidRequest(format!("Invalid entry id: {value:?}"))
                    })?;
                    request.entry_id = Some(EntryId(id));
                }
                SUBMISSION_MARKER_ACTION => {
                    request.submission_marker = non_empty(value).map(EditToken::new)
                }
                "gform_uploaded_files" => {
                    request.values.uploaded_files = parse_uploaded_files(&value);
                }
                _ if name.starts_with(INPUT_PREFIX) => {
                    let field_id = name[INPUT_PREFIX.len()..].to_string();
                    request.values.fields.insert(field_id, value);
                }
                _ if name.starts_with("edit_") => {
                    if let Some(token) = non_empty(value) {
                        request.scoped_tokens.insert(name.clone(), EditToken::new(token));
                    }
                }
                _ => {}
            }
        }

        Ok(request)
    }

    /// Request for the entry editor: `view=entry` with an `edit` token, or a
    /// submitted update
    pub fn is_edit_request(&self) -> bool {
        let editor_page = self.view.as_deref() == Some(VIEW_ENTRY) && self.edit_token.is_some();
        editor_page || self.is_submission()
    }

    /// A submitted edit form
    pub fn is_submission(&self) -> bool {
        self.action.as_deref() == Some(ACTION_UPDATE)
    }

    /// The token presented for a tuple: the tuple-named form field when the
    /// form was submitted, otherwise the `edit` link parameter
    pub fn token_for(&self, scope: &TokenScope) -> Option<&EditToken> {
        self.scoped_tokens
            .get(&scope.action_key())
            .or(self.edit_token.as_ref())
    }
}

/// Decode the uploaded files map; anything but a JSON object counts as none
fn parse_uploaded_files(raw: &str) -> BTreeMap<String, Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FormId, ViewId};

    #[test]
    fn test_editor_page_request() {
        let request = EditRequest::parse("page=gf_entries&view=entry&edit=abc123", None).unwrap();
        assert!(request.is_edit_request());
        assert!(!request.is_submission());
        assert_eq!(request.edit_token, Some(EditToken::new("abc123")));
    }

    #[test]
    fn test_view_without_token_is_not_edit() {
        let request = EditRequest::parse("view=entry", None).unwrap();
        assert!(!request.is_edit_request());

        let request = EditRequest::parse("view=entry&edit=", None).unwrap();
        assert!(!request.is_edit_request());
    }

    #[test]
    fn test_submission_parsing() {
        let body = "action=update&lid=42&is_gv_edit_entry=m4rk&edit_10_3_42=tok\
                    &input_1=Jane&input_2.3=Doe&gform_uploaded_files=%7B%22input_5%22%3A%5B%5D%7D\
                    &save=Update";
        let request = EditRequest::parse("", Some(body)).unwrap();

        assert!(request.is_submission());
        assert!(request.is_edit_request());
        assert_eq!(request.entry_id, Some(EntryId(42)));
        assert_eq!(request.submission_marker, Some(EditToken::new("m4rk")));
        assert_eq!(request.values.fields.get("1").map(String::as_str), Some("Jane"));
        assert_eq!(request.values.fields.get("2.3").map(String::as_str), Some("Doe"));
        assert!(request.values.uploaded_files.contains_key("input_5"));

        let scope = TokenScope::new(ViewId(10), FormId(3), EntryId(42));
        assert_eq!(request.token_for(&scope), Some(&EditToken::new("tok")));
    }

    #[test]
    fn test_token_falls_back_to_query() {
        let request = EditRequest::parse("view=entry&edit=fromlink", Some("action=update")).unwrap();
        let scope = TokenScope::new(ViewId(1), FormId(1), EntryId(1));
        assert_eq!(request.token_for(&scope), Some(&EditToken::new("fromlink")));
    }

    #[test]
    fn test_token_for_other_tuple_not_used() {
        let request = EditRequest::parse("", Some("action=update&edit_10_3_42=tok")).unwrap();
        let other = TokenScope::new(ViewId(10), FormId(3), EntryId(43));
        assert_eq!(request.token_for(&other), None);
    }

    #[test]
    fn test_malformed_uploads_ignored() {
        let request =
            EditRequest::parse("", Some("action=update&gform_uploaded_files=not-json")).unwrap();
        assert!(request.values.uploaded_files.is_empty());
    }

    #[test]
    fn test_invalid_entry_id_rejected() {
        let result = EditRequest::parse("", Some("action=update&lid=abc"));
        assert!(matches!(result, Err(EditError::InvalidRequest(_))));
    }

    #[test]
    fn test_leading_question_mark_accepted() {
        let request = EditRequest::parse("?view=entry&edit=t", None).unwrap();
        assert!(request.is_edit_request());
    }
}
