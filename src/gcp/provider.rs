//! Cloud provider boundary
//!
//! The read-only queries the rest of the crate needs from GCP. Every method
//! returns raw provider JSON; canonicalization happens in [`crate::resource`].

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// All firewall rules of a project (every page)
    async fn list_firewalls(&self, project: &str) -> Result<Vec<Value>>;

    /// One firewall rule by name
    async fn get_firewall(&self, project: &str, name: &str) -> Result<Value>;

    /// All VM instances of a project in one zone (every page)
    async fn list_instances(&self, project: &str, zone: &str) -> Result<Vec<Value>>;

    /// One VM instance by name
    async fn get_instance(&self, project: &str, zone: &str, name: &str) -> Result<Value>;

    /// All buckets owned by a project (every page)
    async fn list_buckets(&self, project: &str) -> Result<Vec<Value>>;

    /// Bucket metadata
    async fn get_bucket(&self, bucket: &str) -> Result<Value>;

    /// IAM policy attached to a bucket
    async fn get_bucket_iam_policy(&self, bucket: &str) -> Result<Value>;

    /// IAM policy attached to a project
    async fn get_project_iam_policy(&self, project: &str) -> Result<Value>;
}
