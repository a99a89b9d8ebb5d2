//! Cloud Storage operations

use super::registry::{
    DESCRIBE_GCS_BUCKET, IS_BUCKET_PUBLIC, IS_UBLA_ENABLED_IN_BUCKET, LIST_GCS_BUCKETS,
};
use crate::gcp::CloudProvider;
use crate::posture;
use crate::resource::{bucket, Bucket, IamPolicy};
use anyhow::{Context, Result};
use serde_json::Value;

pub async fn list_gcs_buckets(provider: &dyn CloudProvider, project_id: &str) -> Result<Value> {
    LIST_GCS_BUCKETS
        .run(&[("project_id", project_id)], async {
            let raw = provider
                .list_buckets(project_id)
                .await
                .with_context(|| format!("Failed to list buckets of {}", project_id))?;
            anyhow::Ok(raw.iter().map(Bucket::from).collect::<Vec<_>>())
        })
        .await
}

pub async fn describe_gcs_bucket(
    provider: &dyn CloudProvider,
    project_id: &str,
    bucket_name: &str,
) -> Result<Value> {
    DESCRIBE_GCS_BUCKET
        .run(
            &[("project_id", project_id), ("bucket_name", bucket_name)],
            provider.get_bucket(bucket_name),
        )
        .await
}

pub async fn is_ubla_enabled_in_bucket(
    provider: &dyn CloudProvider,
    project_id: &str,
    bucket_name: &str,
) -> Result<Value> {
    IS_UBLA_ENABLED_IN_BUCKET
        .run(
            &[("project_id", project_id), ("bucket_name", bucket_name)],
            async {
                let raw = provider.get_bucket(bucket_name).await?;
                anyhow::Ok(bucket::uniform_access_enabled(&raw))
            },
        )
        .await
}

pub async fn is_bucket_public(
    provider: &dyn CloudProvider,
    project_id: &str,
    bucket_name: &str,
) -> Result<Value> {
    IS_BUCKET_PUBLIC
        .run(
            &[("project_id", project_id), ("bucket_name", bucket_name)],
            async {
                let raw = provider
                    .get_bucket_iam_policy(bucket_name)
                    .await
                    .with_context(|| format!("Failed to get IAM policy of bucket {}", bucket_name))?;
                let policy = IamPolicy::from(&raw);
                anyhow::Ok(posture::is_public(&policy.bindings))
            },
        )
        .await
}
