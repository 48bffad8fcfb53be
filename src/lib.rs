//! Entry Edit Gate - front-end entry editing decisions
//!
//! Decides whether a visitor may edit a submitted form entry from a view,
//! and whether their submission is acceptable, on top of a host forms
//! plugin that owns the entries, forms, validation and storage.
//!
//! ## Components
//!
//! - **Access Gate**: edit link token, entry status, ownership-or-role check
//! - **Validation Override**: discounts host validation failures on
//!   post-derived fields the editor cannot change
//! - **Token Lifecycle**: HMAC tokens bound to one (view, form, entry) tuple
//! - **Service**: the request flow from gate to host save and after-save hooks

pub mod auth;
pub mod config;
pub mod hooks;
pub mod host;
pub mod model;
pub mod notice;
pub mod request;
pub mod scenario;
pub mod service;
pub mod types;
pub mod validation;

pub use config::Args;
pub use service::{EditContext, EditOutcome, EditService};
pub use types::{EditError, EditFailure, Result};
