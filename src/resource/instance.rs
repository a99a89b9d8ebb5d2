//! VM instances

use super::{extract_short_name, str_field};
use serde::Serialize;
use serde_json::Value;

/// Canonical VM instance summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instance {
    pub name: String,
    /// RUNNING, STOPPED, TERMINATED, ... as reported
    pub status: String,
    /// Bare machine type, e.g. "e2-medium"
    pub machine_type: String,
}

impl From<&Value> for Instance {
    fn from(value: &Value) -> Self {
        Self {
            name: str_field(value, "name"),
            status: str_field(value, "status"),
            machine_type: extract_short_name(&str_field(value, "machineType")).to_string(),
        }
    }
}
