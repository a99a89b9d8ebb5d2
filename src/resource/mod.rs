//! Canonical resource records
//!
//! Raw provider JSON goes in, a fixed-schema record comes out. Each kind has
//! exactly one canonical schema and one total conversion (`From<&Value>`):
//! absent upstream attributes become the zero value of the field's type, so
//! every key is present when a record is serialized.
//!
//! - [`firewall`] - Firewall rules
//! - [`instance`] - VM instances
//! - [`bucket`] - Cloud Storage buckets
//! - [`iam`] - IAM policies and bindings

pub mod bucket;
pub mod firewall;
pub mod iam;
pub mod instance;

pub use bucket::Bucket;
pub use firewall::{Allowed, Direction, FirewallRule};
pub use iam::{Binding, IamPolicy};
pub use instance::Instance;

use serde_json::Value;

/// Final `/`-delimited segment of a GCP resource URL
/// e.g., "https://www.googleapis.com/compute/v1/projects/p/global/networks/default" -> "default"
pub fn extract_short_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// String field or `""`
pub(crate) fn str_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Array of strings or `[]`; non-string entries are skipped
pub(crate) fn string_list(item: &Value, key: &str) -> Vec<String> {
    item.get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
