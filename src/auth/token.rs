//! Edit link tokens
//!
//! A token is HMAC-SHA256 over the action key, hex encoded. The edit action
//! key names the exact (view, form, entry) tuple, so a token minted for one
//! entry never verifies for another.
//!
//! Tokens carry no timestamp. They stay valid until the secret rotates.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;

use crate::model::{EntryId, FormId, ViewId};
use crate::types::EditError;

type HmacSha256 = Hmac<Sha256>;

/// Action key of the marker carried by submitted edit forms
pub const SUBMISSION_MARKER_ACTION: &str = "is_gv_edit_entry";

/// The tuple an edit token is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenScope {
    pub view_id: ViewId,
    pub form_id: FormId,
    pub entry_id: EntryId,
}

impl TokenScope {
    pub fn new(view_id: ViewId, form_id: FormId, entry_id: EntryId) -> Self {
        Self {
            view_id,
            form_id,
            entry_id,
        }
    }

    /// Action key, also used as the name of the submitted token field
    pub fn action_key(&self) -> String {
        format!("edit_{}_{}_{}", self.view_id, self.form_id, self.entry_id)
    }
}

/// What a token authorizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAction {
    /// Edit one entry through one view
    EditEntry(TokenScope),
    /// Mark a request as an edit form submission
    SubmissionMarker,
}

impl TokenAction {
    pub fn key(&self) -> String {
        match self {
            TokenAction::EditEntry(scope) => scope.action_key(),
            TokenAction::SubmissionMarker => SUBMISSION_MARKER_ACTION.to_string(),
        }
    }
}

/// Token value as embedded in links and forms
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditToken(String);

impl EditToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EditToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keyed MAC over the secret at rest
#[derive(Clone)]
pub struct EditTokenKey {
    mac: HmacSha256,
}

impl fmt::Debug for EditTokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EditTokenKey(..)")
    }
}

impl EditTokenKey {
    /// Key the MAC with the given secret. Empty secrets are rejected.
    pub fn new(secret: &[u8]) -> Result<Self, EditError> {
        if secret.is_empty() {
            return Err(EditError::Config("edit link secret must not be empty".to_string()));
        }
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| EditError::Config(format!("Invalid edit link secret: {e}")))?;
        Ok(Self { mac })
    }

    /// Mint the token for an action
    pub fn mint(&self, action: &TokenAction) -> EditToken {
        let mut mac = self.mac.clone();
        mac.update(action.key().as_bytes());
        EditToken(hex::encode(mac.finalize().into_bytes()))
    }

    /// Recompute the expected token and compare in constant time
    pub fn verify(&self, action: &TokenAction, token: &EditToken) -> bool {
        let expected = self.mint(action);
        expected.0.as_bytes().ct_eq(token.0.as_bytes()).into()
    }

    pub fn mint_for_entry(&self, scope: TokenScope) -> EditToken {
        self.mint(&TokenAction::EditEntry(scope))
    }

    pub fn verify_for_entry(&self, scope: TokenScope, token: &EditToken) -> bool {
        self.verify(&TokenAction::EditEntry(scope), token)
    }
}
