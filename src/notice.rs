//! Notices shown to the person editing

use serde::{Deserialize, Serialize};

use crate::types::EditFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Error,
    Success,
}

/// A message for the top of the edit form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// Where the "Return to Entry" link points, on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
}

impl Notice {
    pub fn failure(failure: EditFailure) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: failure.message().to_string(),
            return_url: None,
        }
    }

    pub fn updated(return_url: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: "Entry Updated.".to_string(),
            return_url: Some(return_url.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl From<EditFailure> for Notice {
    fn from(failure: EditFailure) -> Self {
        Notice::failure(failure)
    }
}
