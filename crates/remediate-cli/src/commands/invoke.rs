//! `remediate invoke` - handle a JSON invocation envelope.
//!
//! Accepts the same envelopes the runner does:
//! `{"action": "listRemediations"}` and
//! `{"action": "remediate", "payload": {...}}`.

use anyhow::{Context, Result};
use remediate_core::Invocation;
use std::io::Read;
use std::path::Path;

use super::{build_remediator, load_config};
use crate::GlobalArgs;

pub async fn run(global: &GlobalArgs, input: Option<&Path>) -> Result<()> {
    let content = read_input(input)?;
    let invocation = Invocation::from_json(&content).context("Failed to parse invocation")?;

    let config = load_config(global)?;
    let remediator = build_remediator(&config).await?;

    let response = remediator.handle(invocation).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read invocation from {:?}", path)),
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read invocation from stdin")?;
            Ok(content)
        }
    }
}
