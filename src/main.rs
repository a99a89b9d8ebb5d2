use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gcp_posture::config::Config;
use gcp_posture::gcp::client::GcpClient;
use gcp_posture::logging::{self, LogLevel};
use gcp_posture::tools::{self, OPERATIONS};
use std::collections::HashMap;

/// Read-only GCP introspection and security-posture checks
#[derive(Parser, Debug)]
#[command(name = "gcp-posture", version = gcp_posture::VERSION, about, long_about = None)]
struct Args {
    /// GCP project to use when an operation's project_id is not given
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// GCP zone to use when an operation's zone is not given
    #[arg(short, long, global = true)]
    zone: Option<String>,

    /// Log level (JSON lines on stderr)
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one operation and print its JSON result on stdout
    Run {
        /// Operation name, e.g. unsafe_ssh_exposure
        operation: String,

        /// Operation argument as key=value (repeatable)
        #[arg(short = 'a', long = "arg")]
        args: Vec<String>,
    },
    /// List available operations with their result shape and parameters
    ListOperations,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = logging::init(args.log_level);

    match &args.command {
        Command::ListOperations => {
            println!("{}", serde_json::to_string_pretty(OPERATIONS)?);
            Ok(())
        }
        Command::Run { operation, args: pairs } => {
            let config = Config::load();
            let call_args = resolve_args(&args, &config, pairs)?;
            let result = run_operation(operation, &call_args, &config, args.timeout_secs).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

/// Merge explicit `key=value` arguments with project/zone defaults
fn resolve_args(args: &Args, config: &Config, pairs: &[String]) -> Result<HashMap<String, String>> {
    let mut call_args = tools::parse_args(pairs)?;

    if !call_args.contains_key("project_id") {
        if let Some(project) = config.effective_project(args.project.as_deref()) {
            call_args.insert("project_id".to_string(), project);
        }
    }
    if !call_args.contains_key("zone") {
        if let Some(zone) = config.effective_zone(args.zone.as_deref()) {
            call_args.insert("zone".to_string(), zone);
        }
    }

    Ok(call_args)
}

/// One invocation: the client lives exactly as long as the call
async fn run_operation(
    operation: &str,
    call_args: &HashMap<String, String>,
    config: &Config,
    timeout_secs: Option<u64>,
) -> Result<serde_json::Value> {
    if tools::get_operation(operation).is_none() {
        anyhow::bail!(
            "Unknown operation: {} (available: {})",
            operation,
            tools::get_all_operation_names().join(", ")
        );
    }

    let client = GcpClient::new(config.effective_timeout(timeout_secs))
        .await
        .context("Failed to create GCP client")?;

    tools::invoke(operation, call_args, &client)
        .await
        .with_context(|| format!("Operation {} failed", operation))
}
