//! Compute Engine operations: instances and firewall rules

use super::registry::{
    DESCRIBE_FIREWALL_RULE, DESCRIBE_GCP_INSTANCE, LIST_FIREWALL_RULES,
    LIST_FIREWALL_RULES_PER_VPC, LIST_GCP_INSTANCES, UNSAFE_SSH_EXPOSURE,
};
use crate::gcp::CloudProvider;
use crate::posture;
use crate::resource::{FirewallRule, Instance};
use anyhow::{Context, Result};
use serde_json::Value;

/// Canonical firewall rules of a project
async fn fetch_firewall_rules(
    provider: &dyn CloudProvider,
    project_id: &str,
) -> Result<Vec<FirewallRule>> {
    let raw = provider
        .list_firewalls(project_id)
        .await
        .with_context(|| format!("Failed to list firewall rules of {}", project_id))?;
    Ok(raw.iter().map(FirewallRule::from).collect())
}

pub async fn list_gcp_instances(
    provider: &dyn CloudProvider,
    project_id: &str,
    zone: &str,
) -> Result<Value> {
    LIST_GCP_INSTANCES
        .run(&[("project_id", project_id), ("zone", zone)], async {
            let raw = provider
                .list_instances(project_id, zone)
                .await
                .with_context(|| format!("Failed to list instances in {}/{}", project_id, zone))?;
            anyhow::Ok(raw.iter().map(Instance::from).collect::<Vec<_>>())
        })
        .await
}

pub async fn describe_gcp_instance(
    provider: &dyn CloudProvider,
    instance_name: &str,
    project_id: &str,
    zone: &str,
) -> Result<Value> {
    DESCRIBE_GCP_INSTANCE
        .run(
            &[
                ("instance_name", instance_name),
                ("project_id", project_id),
                ("zone", zone),
            ],
            provider.get_instance(project_id, zone, instance_name),
        )
        .await
}

pub async fn list_firewall_rules(provider: &dyn CloudProvider, project_id: &str) -> Result<Value> {
    LIST_FIREWALL_RULES
        .run(
            &[("project_id", project_id)],
            fetch_firewall_rules(provider, project_id),
        )
        .await
}

pub async fn list_firewall_rules_per_vpc(
    provider: &dyn CloudProvider,
    project_id: &str,
    vpc_name: &str,
) -> Result<Value> {
    LIST_FIREWALL_RULES_PER_VPC
        .run(&[("project_id", project_id), ("vpc_name", vpc_name)], async {
            let rules = fetch_firewall_rules(provider, project_id).await?;
            let in_vpc: Vec<FirewallRule> = posture::rules_in_vpc(&rules, vpc_name)
                .into_iter()
                .cloned()
                .collect();
            anyhow::Ok(in_vpc)
        })
        .await
}

pub async fn describe_firewall_rule(
    provider: &dyn CloudProvider,
    project_id: &str,
    rule_name: &str,
) -> Result<Value> {
    DESCRIBE_FIREWALL_RULE
        .run(
            &[("project_id", project_id), ("rule_name", rule_name)],
            provider.get_firewall(project_id, rule_name),
        )
        .await
}

pub async fn unsafe_ssh_exposure(provider: &dyn CloudProvider, project_id: &str) -> Result<Value> {
    UNSAFE_SSH_EXPOSURE
        .run(&[("project_id", project_id)], async {
            let rules = fetch_firewall_rules(provider, project_id).await?;
            let exposed = posture::unsafe_ssh_exposure(&rules);
            if !exposed.is_empty() {
                tracing::warn!(project_id, count = exposed.len(), "SSH exposed to the internet");
            }
            anyhow::Ok(exposed)
        })
        .await
}
