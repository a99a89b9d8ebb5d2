//! Operation dispatch
//!
//! Maps an operation name plus string arguments to the matching call.

use super::registry::get_operation;
use super::{compute, iam, storage};
use crate::gcp::CloudProvider;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Invoke a registered operation by name
///
/// Unknown operations and missing arguments are errors, never empty results.
pub async fn invoke(
    name: &str,
    args: &HashMap<String, String>,
    provider: &dyn CloudProvider,
) -> Result<Value> {
    let Some(op) = get_operation(name) else {
        return Err(anyhow::anyhow!("Unknown operation: {}", name));
    };

    for param in op.params {
        get_param_str(args, param)?;
    }
    tracing::debug!(operation = op.name, "dispatch");

    let project_id = get_param_str(args, "project_id")?;

    match op.name {
        "list_gcp_instances" => {
            compute::list_gcp_instances(provider, project_id, get_param_str(args, "zone")?).await
        },
        "describe_gcp_instance" => {
            compute::describe_gcp_instance(
                provider,
                get_param_str(args, "instance_name")?,
                project_id,
                get_param_str(args, "zone")?,
            )
            .await
        },
        "list_firewall_rules" => compute::list_firewall_rules(provider, project_id).await,
        "list_firewall_rules_per_vpc" => {
            compute::list_firewall_rules_per_vpc(provider, project_id, get_param_str(args, "vpc_name")?)
                .await
        },
        "describe_firewall_rule" => {
            compute::describe_firewall_rule(provider, project_id, get_param_str(args, "rule_name")?)
                .await
        },
        "unsafe_ssh_exposure" => compute::unsafe_ssh_exposure(provider, project_id).await,
        "list_gcs_buckets" => storage::list_gcs_buckets(provider, project_id).await,
        "describe_gcs_bucket" => {
            storage::describe_gcs_bucket(provider, project_id, get_param_str(args, "bucket_name")?)
                .await
        },
        "is_ubla_enabled_in_bucket" => {
            storage::is_ubla_enabled_in_bucket(
                provider,
                project_id,
                get_param_str(args, "bucket_name")?,
            )
            .await
        },
        "is_bucket_public" => {
            storage::is_bucket_public(provider, project_id, get_param_str(args, "bucket_name")?)
                .await
        },
        "list_project_iam" => iam::list_project_iam(provider, project_id).await,
        "list_project_owners" => iam::list_project_owners(provider, project_id).await,
        _ => Err(anyhow::anyhow!("Operation not wired: {}", op.name)),
    }
}

/// Parse `key=value` pairs from the command line
pub fn parse_args<I, S>(pairs: I) -> Result<HashMap<String, String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|pair| {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("Argument must be key=value: {}", pair))?;
            Ok((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

fn get_param_str<'a>(args: &'a HashMap<String, String>, key: &str) -> Result<&'a str> {
    args.get(key)
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
        .with_context(|| format!("Missing required parameter: {}", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = parse_args(["project_id=my-project", "zone = us-central1-a"]).unwrap();
        assert_eq!(args["project_id"], "my-project");
        assert_eq!(args["zone"], "us-central1-a");

        assert!(parse_args(["no-equals-sign"]).is_err());
    }

    #[test]
    fn test_get_param_str_rejects_empty() {
        let args = parse_args(["project_id="]).unwrap();
        assert!(get_param_str(&args, "project_id").is_err());
        assert!(get_param_str(&args, "zone").is_err());
    }
}
