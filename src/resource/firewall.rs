//! Firewall rules

use super::{extract_short_name, str_field, string_list};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::convert::Infallible;
use std::str::FromStr;

/// Traffic direction of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Ingress,
    Egress,
    /// Direction missing or not recognized upstream
    #[default]
    Unspecified,
}

impl FromStr for Direction {
    type Err = Infallible;

    /// Unrecognized values parse as `Unspecified`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "INGRESS" => Self::Ingress,
            "EGRESS" => Self::Egress,
            _ => Self::Unspecified,
        })
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ingress => "INGRESS",
            Self::Egress => "EGRESS",
            Self::Unspecified => "",
        }
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One `allowed` entry: a protocol and its port-or-range strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allowed {
    pub protocol: String,
    pub ports: Vec<String>,
}

impl From<&Value> for Allowed {
    fn from(value: &Value) -> Self {
        Self {
            protocol: str_field(value, "IPProtocol"),
            ports: string_list(value, "ports"),
        }
    }
}

/// Canonical firewall rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FirewallRule {
    pub name: String,
    /// Network URI as returned by the API (or a bare name)
    pub network: String,
    pub direction: Direction,
    pub allowed: Vec<Allowed>,
    pub source_ranges: Vec<String>,
    pub source_tags: Vec<String>,
    pub destination_ranges: Vec<String>,
    pub enabled: bool,
    pub priority: i64,
    pub self_link: String,
}

impl FirewallRule {
    /// Bare network name (last segment of the network URI)
    pub fn network_name(&self) -> &str {
        extract_short_name(&self.network)
    }

    /// Bare rule name, preferring the self link when there is one
    pub fn short_name(&self) -> &str {
        if self.self_link.is_empty() {
            &self.name
        } else {
            extract_short_name(&self.self_link)
        }
    }
}

impl From<&Value> for FirewallRule {
    fn from(value: &Value) -> Self {
        Self {
            name: str_field(value, "name"),
            network: str_field(value, "network"),
            direction: str_field(value, "direction").parse().unwrap_or_default(),
            allowed: value
                .get("allowed")
                .and_then(|v| v.as_array())
                .map(|arr| arr.iter().map(Allowed::from).collect())
                .unwrap_or_default(),
            source_ranges: string_list(value, "sourceRanges"),
            source_tags: string_list(value, "sourceTags"),
            destination_ranges: string_list(value, "destinationRanges"),
            // The API reports `disabled`, omitted when false
            enabled: !value
                .get("disabled")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            priority: value
                .get("priority")
                .and_then(|v| v.as_i64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
                .unwrap_or(0),
            self_link: str_field(value, "selfLink"),
        }
    }
}
