//! Security posture rules
//!
//! Pure functions over canonical records. They never fail and never mutate
//! their input: no match is an empty list or `false`.

use crate::resource::{extract_short_name, Binding, Direction, FirewallRule};
use serde::Serialize;

/// Source range meaning "anywhere on the internet"
pub const ANY_IPV4: &str = "0.0.0.0/0";

/// Port string an SSH-exposing rule lists. Matched literally: a range such as
/// "20-25" does not count.
pub const SSH_PORT: &str = "22";

/// Principals that make a resource public
pub const PUBLIC_PRINCIPALS: &[&str] = &["allUsers", "allAuthenticatedUsers"];

/// Project owner role
pub const OWNER_ROLE: &str = "roles/owner";

/// A firewall rule flagged by [`unsafe_ssh_exposure`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExposedRule {
    pub name: String,
    pub network: String,
}

/// Whether a single rule opens tcp/22 to 0.0.0.0/0
pub fn exposes_ssh(rule: &FirewallRule) -> bool {
    rule.source_ranges.iter().any(|r| r == ANY_IPV4)
        && rule.enabled
        && rule.direction == Direction::Ingress
        && rule
            .allowed
            .iter()
            .any(|a| a.protocol == "tcp" && a.ports.iter().any(|p| p == SSH_PORT))
}

/// Rules exposing SSH to the internet, as `{name, network}` bare names
pub fn unsafe_ssh_exposure(rules: &[FirewallRule]) -> Vec<ExposedRule> {
    rules
        .iter()
        .filter(|rule| exposes_ssh(rule))
        .map(|rule| ExposedRule {
            name: rule.short_name().to_string(),
            network: rule.network_name().to_string(),
        })
        .collect()
}

/// Whether any binding grants a role to `allUsers` or `allAuthenticatedUsers`
pub fn is_public(bindings: &[Binding]) -> bool {
    bindings
        .iter()
        .any(|b| PUBLIC_PRINCIPALS.iter().any(|p| b.has_member(p)))
}

/// Member lists of every `roles/owner` binding, one entry per binding
pub fn owners(bindings: &[Binding]) -> Vec<Vec<String>> {
    bindings
        .iter()
        .filter(|b| b.role == OWNER_ROLE)
        .map(|b| b.members.clone())
        .collect()
}

/// Rules attached to the VPC named `vpc_name` (exact match on the last
/// segment of the network URI)
pub fn rules_in_vpc<'a>(rules: &'a [FirewallRule], vpc_name: &str) -> Vec<&'a FirewallRule> {
    rules
        .iter()
        .filter(|rule| extract_short_name(&rule.network) == vpc_name)
        .collect()
}
