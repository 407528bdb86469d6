use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "remediate", version, about = "Run AWS remediation actions")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    cmd: Command,
}

/// Session and config options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// YAML configuration file
    #[arg(long, global = true, env = "REMEDIATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// AWS region (overrides aws.region)
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Named AWS profile (overrides aws.profile)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// IAM role to assume before remediating (overrides aws.assume_role_arn)
    #[arg(long = "role-arn", global = true)]
    pub role_arn: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available remediations and their default parameters
    List,

    /// Run one remediation against one resource
    Fix {
        /// Remediation id, e.g. AWS.RDS.EnableAutoMinorVersionUpgrade
        #[arg(long = "remediation-id")]
        remediation_id: String,

        /// Resource identifier (shorthand for --resource '{"Id": "..."}')
        #[arg(long = "resource-id", required_unless_present = "resource", conflicts_with = "resource")]
        resource_id: Option<String>,

        /// Full resource descriptor as JSON
        #[arg(long)]
        resource: Option<String>,

        /// Parameter as KEY=VALUE (repeatable)
        #[arg(long = "param", value_parser = commands::parse_param)]
        params: Vec<(String, String)>,
    },

    /// Handle a JSON invocation envelope ({"action": ...}) and print the response
    Invoke {
        /// File holding the envelope; "-" or absent reads stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries JSON results only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::List => commands::list::run()?,

        Command::Fix {
            remediation_id,
            resource_id,
            resource,
            params,
        } => {
            commands::fix::run(
                &cli.global,
                &remediation_id,
                resource_id.as_deref(),
                resource.as_deref(),
                params,
            )
            .await?
        }

        Command::Invoke { input } => commands::invoke::run(&cli.global, input.as_deref()).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_parses_without_arguments() {
        let cli = Cli::try_parse_from(["remediate", "list"]).unwrap();
        assert!(matches!(cli.cmd, Command::List));
        assert!(Cli::try_parse_from(["remediate", "list", "extra"]).is_err());
    }

    #[test]
    fn fix_requires_a_resource() {
        let err = Cli::try_parse_from([
            "remediate",
            "fix",
            "--remediation-id",
            "AWS.RDS.EnableAutoMinorVersionUpgrade",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn fix_parses_params_and_globals() {
        let cli = Cli::try_parse_from([
            "remediate",
            "fix",
            "--remediation-id",
            "AWS.RDS.EnableAutoMinorVersionUpgrade",
            "--resource-id",
            "db-1",
            "--param",
            "ApplyImmediately=false",
            "--region",
            "eu-west-1",
        ])
        .unwrap();

        assert_eq!(cli.global.region.as_deref(), Some("eu-west-1"));
        match cli.cmd {
            Command::Fix {
                resource_id, params, ..
            } => {
                assert_eq!(resource_id.as_deref(), Some("db-1"));
                assert_eq!(
                    params,
                    vec![("ApplyImmediately".to_string(), "false".to_string())]
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
