//! Self-contained edit scenarios
//!
//! A scenario bundles forms, entries, the view, the actor and a raw request
//! into one JSON document and runs it against `MemoryHost`. The literal
//! `{token}` in the query or body is replaced with the valid token for the
//! scenario's tuple.

use serde::Deserialize;
use std::sync::Arc;

use crate::auth::EditTokenKey;
use crate::host::{MemoryHost, RequiredFieldValidator};
use crate::model::{Actor, Entry, EntryId, Form, View};
use crate::request::EditRequest;
use crate::service::{EditContext, EditOutcome, EditService};
use crate::types::Result;
use crate::validation::ValidationOverride;

/// Placeholder for the valid tuple token
pub const TOKEN_PLACEHOLDER: &str = "{token}";

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub view: View,
    #[serde(default)]
    pub forms: Vec<Form>,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub actor: Actor,
    pub entry_id: EntryId,
    pub page_url: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl Scenario {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Run the scenario through `EditService::handle`
    pub fn run(&self, key: EditTokenKey, policy: ValidationOverride) -> Result<EditOutcome> {
        let host = Arc::new(MemoryHost::new());
        for form in &self.forms {
            host.insert_form(form.clone());
        }
        for entry in &self.entries {
            host.insert_entry(entry.clone());
        }

        let token = key.mint_for_entry(self.view.scope_for(self.entry_id));
        let query = self.query.replace(TOKEN_PLACEHOLDER, token.as_str());
        let body = self
            .body
            .as_ref()
            .map(|body| body.replace(TOKEN_PLACEHOLDER, token.as_str()));
        let request = EditRequest::parse(&query, body.as_deref())?;

        let service = EditService::new(key, host.clone(), host, Arc::new(RequiredFieldValidator))
            .with_override(policy);
        service.handle(
            &EditContext {
                view: &self.view,
                entry_id: self.entry_id,
                actor: &self.actor,
                page_url: &self.page_url,
            },
            &request,
        )
    }
}
