use std::io::{BufRead, Write};

use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthLoginArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    stored: bool,
    masked_key: String,
    source: Option<String>,
}

pub fn run(args: &AuthLoginArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let api_key = match &args.api_key {
        Some(key) => key.clone(),
        None => prompt_for_key()?,
    };
    let api_key = api_key.trim().to_string();
    anyhow::ensure!(!api_key.is_empty(), "API key must not be empty");

    prism_auth::store(&api_key)?;

    output(
        &AuthLoginResponse {
            stored: true,
            masked_key: prism_auth::mask(&api_key),
            source: prism_auth::detect_source(),
        },
        flags.format,
    )
}

fn prompt_for_key() -> anyhow::Result<String> {
    eprint!("API key: ");
    std::io::stderr().flush().ok();
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read API key from stdin")?;
    Ok(line)
}
