//! Operation registry
//!
//! Every operation the agent can call, with its stable name, declared result
//! shape and parameters. The shape decides what a swallowed failure returns.

use crate::outcome::{self, ResultShape};
use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;

/// Operation definition
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Operation {
    pub name: &'static str,
    pub shape: ResultShape,
    /// Required string arguments, in call order
    pub params: &'static [&'static str],
    pub description: &'static str,
}

impl Operation {
    /// Run `call` through the outcome guard under this operation's name and shape
    pub async fn run<T, F>(&self, args: &[(&str, &str)], call: F) -> Result<Value>
    where
        T: Serialize,
        F: Future<Output = Result<T>>,
    {
        outcome::guard(self.name, self.shape, args, call).await
    }
}

// =============================================================================
// Compute Engine
// =============================================================================

pub const LIST_GCP_INSTANCES: Operation = Operation {
    name: "list_gcp_instances",
    shape: ResultShape::Collection,
    params: &["project_id", "zone"],
    description: "List VM instances of a project in one zone (name, status, machine type)",
};

pub const DESCRIBE_GCP_INSTANCE: Operation = Operation {
    name: "describe_gcp_instance",
    shape: ResultShape::Record,
    params: &["instance_name", "project_id", "zone"],
    description: "Full metadata of one VM instance",
};

pub const LIST_FIREWALL_RULES: Operation = Operation {
    name: "list_firewall_rules",
    shape: ResultShape::Collection,
    params: &["project_id"],
    description: "List every firewall rule of a project, all VPCs",
};

pub const LIST_FIREWALL_RULES_PER_VPC: Operation = Operation {
    name: "list_firewall_rules_per_vpc",
    shape: ResultShape::Collection,
    params: &["project_id", "vpc_name"],
    description: "List firewall rules of one VPC, given its bare network name (e.g. \"default\")",
};

pub const DESCRIBE_FIREWALL_RULE: Operation = Operation {
    name: "describe_firewall_rule",
    shape: ResultShape::Record,
    params: &["project_id", "rule_name"],
    description: "Full details of one firewall rule",
};

pub const UNSAFE_SSH_EXPOSURE: Operation = Operation {
    name: "unsafe_ssh_exposure",
    shape: ResultShape::Collection,
    params: &["project_id"],
    description: "Firewall rules allowing tcp/22 from 0.0.0.0/0, as {name, network}",
};

// =============================================================================
// Cloud Storage
// =============================================================================

pub const LIST_GCS_BUCKETS: Operation = Operation {
    name: "list_gcs_buckets",
    shape: ResultShape::Collection,
    params: &["project_id"],
    description: "List buckets of a project",
};

pub const DESCRIBE_GCS_BUCKET: Operation = Operation {
    name: "describe_gcs_bucket",
    shape: ResultShape::Record,
    params: &["project_id", "bucket_name"],
    description: "Full metadata of one bucket",
};

pub const IS_UBLA_ENABLED_IN_BUCKET: Operation = Operation {
    name: "is_ubla_enabled_in_bucket",
    shape: ResultShape::Record,
    params: &["project_id", "bucket_name"],
    description: "Whether uniform bucket-level access is enabled on a bucket",
};

pub const IS_BUCKET_PUBLIC: Operation = Operation {
    name: "is_bucket_public",
    shape: ResultShape::Record,
    params: &["project_id", "bucket_name"],
    description: "Whether a bucket grants any role to allUsers or allAuthenticatedUsers",
};

// =============================================================================
// IAM
// =============================================================================

pub const LIST_PROJECT_IAM: Operation = Operation {
    name: "list_project_iam",
    shape: ResultShape::Collection,
    params: &["project_id"],
    description: "IAM policy of a project: role bindings and their members",
};

pub const LIST_PROJECT_OWNERS: Operation = Operation {
    name: "list_project_owners",
    shape: ResultShape::Collection,
    params: &["project_id"],
    description: "Member lists of every roles/owner binding of a project",
};

/// All registered operations
pub static OPERATIONS: &[Operation] = &[
    LIST_GCP_INSTANCES,
    DESCRIBE_GCP_INSTANCE,
    LIST_FIREWALL_RULES,
    LIST_FIREWALL_RULES_PER_VPC,
    DESCRIBE_FIREWALL_RULE,
    UNSAFE_SSH_EXPOSURE,
    LIST_GCS_BUCKETS,
    DESCRIBE_GCS_BUCKET,
    IS_UBLA_ENABLED_IN_BUCKET,
    IS_BUCKET_PUBLIC,
    LIST_PROJECT_IAM,
    LIST_PROJECT_OWNERS,
];

/// Get an operation definition by name
pub fn get_operation(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.name == name)
}

/// Get all operation names (for help output)
pub fn get_all_operation_names() -> Vec<&'static str> {
    OPERATIONS.iter().map(|op| op.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = get_all_operation_names().into_iter().collect();
        assert_eq!(names.len(), OPERATIONS.len());
    }

    #[test]
    fn test_shapes_follow_naming_convention() {
        // Enumerating operations are named with "list" or "unsafe"
        for op in OPERATIONS {
            let enumerates = op.name.contains("list") || op.name.contains("unsafe");
            let expected = if enumerates {
                ResultShape::Collection
            } else {
                ResultShape::Record
            };
            assert_eq!(op.shape, expected, "{} has the wrong shape", op.name);
        }
    }

    #[test]
    fn test_every_operation_takes_a_project() {
        for op in OPERATIONS {
            assert!(op.params.contains(&"project_id"), "{}", op.name);
        }
    }

    #[test]
    fn test_get_operation() {
        let op = get_operation("unsafe_ssh_exposure").unwrap();
        assert_eq!(op.shape, ResultShape::Collection);
        assert!(get_operation("delete_everything").is_none());
    }
}
