//! `remediate list` - print the remediation catalog.

use anyhow::Result;
use remediate_aws::RemediationRegistry;

pub fn run() -> Result<()> {
    let registry = RemediationRegistry::builtin();
    println!("{}", serde_json::to_string_pretty(&registry.list())?);
    Ok(())
}
