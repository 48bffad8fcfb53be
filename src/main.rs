//! edit-gate - mint, verify and evaluate entry edit requests

use anyhow::Context;
use clap::Parser;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zeroize::Zeroizing;

use entry_edit_gate::{
    auth::{EditToken, TokenScope},
    config::{Args, Command, TupleArgs},
    model::{EntryId, FormId, ViewId},
    request::edit_link,
    scenario::Scenario,
};

const SECRET_BYTES: usize = 32;

fn init_tracing(args: &Args) {
    let level = &args.log_level;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("entry_edit_gate={level},edit_gate={level}").into());
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr; stdout carries command output
    if args.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn scope(tuple: &TupleArgs) -> TokenScope {
    TokenScope::new(ViewId(tuple.view), FormId(tuple.form), EntryId(tuple.entry))
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(&args);

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(2);
    }

    match &args.command {
        Command::GenSecret => {
            let mut secret = Zeroizing::new([0u8; SECRET_BYTES]);
            OsRng.fill_bytes(&mut secret[..]);
            println!("{}", hex::encode(&secret[..]));
        }

        Command::Link { tuple, url } => {
            let key = args.token_key()?;
            let token = key.mint_for_entry(scope(tuple));
            println!("{}", edit_link(url, &token)?);
        }

        Command::Verify { tuple, token } => {
            let key = args.token_key()?;
            let valid = key.verify_for_entry(scope(tuple), &EditToken::new(token.as_str()));
            info!(action = %scope(tuple).action_key(), valid, "Token checked");
            println!("{}", if valid { "valid" } else { "invalid" });
            if !valid {
                std::process::exit(1);
            }
        }

        Command::Evaluate { scenario } => {
            let raw = std::fs::read_to_string(scenario)
                .with_context(|| format!("reading scenario {}", scenario.display()))?;
            let scenario = Scenario::from_json(&raw).context("parsing scenario")?;
            info!(
                view_id = %scenario.view.id,
                entry_id = %scenario.entry_id,
                actor = %scenario.actor,
                "Evaluating scenario"
            );

            let outcome = scenario.run(args.token_key()?, args.validation_override())?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}
