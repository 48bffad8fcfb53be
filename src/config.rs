//! Configuration for the edit-gate CLI
//!
//! CLI arguments and environment variable handling using clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use zeroize::Zeroizing;

use crate::auth::EditTokenKey;
use crate::types::EditError;
use crate::validation::{ValidationOverride, POST_FIELD_MARKER};

const DEV_SECRET: &str = "dev-only-insecure-secret";

/// Edit-entry authorization tooling
#[derive(Parser, Debug, Clone)]
#[command(name = "edit-gate")]
#[command(about = "Mint, verify and evaluate front-end entry edit requests")]
#[command(version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_SHORT"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
))]
pub struct Args {
    /// Secret that edit link tokens are keyed with (required outside dev mode)
    #[arg(long, env = "EDIT_LINK_SECRET", global = true, hide_env_values = true)]
    pub secret: Option<String>,

    /// Enable development mode (falls back to an insecure built-in secret)
    #[arg(long, env = "DEV_MODE", default_value = "false", global = true)]
    pub dev_mode: bool,

    /// Field type markers whose validation failures are ignored on edit
    #[arg(
        long = "excluded-field-marker",
        env = "EXCLUDED_FIELD_MARKERS",
        value_delimiter = ',',
        default_value = POST_FIELD_MARKER,
        global = true
    )]
    pub excluded_markers: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", default_value = "false", global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// The (view, form, entry) tuple a token is bound to
#[derive(ClapArgs, Debug, Clone, Copy)]
pub struct TupleArgs {
    #[arg(long)]
    pub view: u64,

    #[arg(long)]
    pub form: u64,

    #[arg(long)]
    pub entry: u64,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print a new random secret (hex)
    GenSecret,

    /// Print the edit link for an entry
    Link {
        #[command(flatten)]
        tuple: TupleArgs,

        /// Link to the single-entry page
        #[arg(long)]
        url: String,
    },

    /// Check a token against a tuple
    Verify {
        #[command(flatten)]
        tuple: TupleArgs,

        #[arg(long)]
        token: String,
    },

    /// Run a JSON scenario through the full edit flow
    Evaluate {
        /// Scenario file
        scenario: PathBuf,
    },
}

impl Args {
    /// Whether the selected command mints or checks tokens
    pub fn needs_secret(&self) -> bool {
        !matches!(self.command, Command::GenSecret)
    }

    /// Get effective secret (uses default in dev mode)
    pub fn secret(&self) -> Result<Zeroizing<String>, EditError> {
        match (&self.secret, self.dev_mode) {
            (Some(secret), _) => Ok(Zeroizing::new(secret.clone())),
            (None, true) => Ok(Zeroizing::new(DEV_SECRET.to_string())),
            (None, false) => Err(EditError::Config(
                "EDIT_LINK_SECRET is required in production mode".to_string(),
            )),
        }
    }

    pub fn token_key(&self) -> Result<EditTokenKey, EditError> {
        let secret = self.secret()?;
        EditTokenKey::new(secret.as_bytes())
    }

    pub fn validation_override(&self) -> ValidationOverride {
        ValidationOverride::with_markers(
            self.excluded_markers
                .iter()
                .map(|m| m.trim())
                .filter(|m| !m.is_empty())
                .map(str::to_string),
        )
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.needs_secret() {
            match &self.secret {
                None if !self.dev_mode => {
                    return Err("EDIT_LINK_SECRET is required in production mode".to_string());
                }
                Some(secret) if secret.is_empty() => {
                    return Err("EDIT_LINK_SECRET must not be empty".to_string());
                }
                _ => {}
            }
        }

        Ok(())
    }
}
