//! Cloud Storage buckets

use super::str_field;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Canonical bucket summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub name: String,
    pub location: String,
    pub storage_class: String,
    /// RFC 3339 creation time as reported
    pub created: String,
    pub labels: BTreeMap<String, String>,
    pub self_link: String,
}

impl From<&Value> for Bucket {
    fn from(value: &Value) -> Self {
        Self {
            name: str_field(value, "name"),
            location: str_field(value, "location"),
            storage_class: str_field(value, "storageClass"),
            created: str_field(value, "timeCreated"),
            labels: value
                .get("labels")
                .and_then(|v| v.as_object())
                .map(|map| {
                    map.iter()
                        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                        .collect()
                })
                .unwrap_or_default(),
            self_link: str_field(value, "selfLink"),
        }
    }
}

/// Whether uniform bucket-level access is on; absent counts as off
pub fn uniform_access_enabled(bucket: &Value) -> bool {
    bucket
        .pointer("/iamConfiguration/uniformBucketLevelAccess/enabled")
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bucket_fields() {
        let bucket = Bucket::from(&json!({
            "name": "bucket-1",
            "location": "US",
            "storageClass": "STANDARD",
            "timeCreated": "2025-12-01T00:00:00Z",
            "labels": {"team": "data"},
            "selfLink": "https://www.googleapis.com/storage/v1/b/bucket-1"
        }));
        assert_eq!(bucket.name, "bucket-1");
        assert_eq!(bucket.storage_class, "STANDARD");
        assert_eq!(bucket.created, "2025-12-01T00:00:00Z");
        assert_eq!(bucket.labels.get("team").map(String::as_str), Some("data"));
    }

    #[test]
    fn test_labels_absent_serialize_as_empty_map() {
        let bucket = Bucket::from(&json!({"name": "b"}));
        let serialized = serde_json::to_value(&bucket).unwrap();
        assert_eq!(serialized["labels"], json!({}));
        assert_eq!(serialized["location"], "");
    }

    #[test]
    fn test_uniform_access_flag() {
        let on = json!({"iamConfiguration": {"uniformBucketLevelAccess": {"enabled": true}}});
        let off = json!({"iamConfiguration": {"uniformBucketLevelAccess": {"enabled": false}}});
        assert!(uniform_access_enabled(&on));
        assert!(!uniform_access_enabled(&off));
        assert!(!uniform_access_enabled(&json!({"name": "b"})));
    }
}
