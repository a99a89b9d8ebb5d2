//! Project IAM operations

use super::registry::{LIST_PROJECT_IAM, LIST_PROJECT_OWNERS};
use crate::gcp::CloudProvider;
use crate::posture;
use crate::resource::IamPolicy;
use anyhow::{Context, Result};
use serde_json::Value;

async fn fetch_project_policy(provider: &dyn CloudProvider, project_id: &str) -> Result<IamPolicy> {
    let raw = provider
        .get_project_iam_policy(project_id)
        .await
        .with_context(|| format!("Failed to get IAM policy of {}", project_id))?;
    Ok(IamPolicy::from(&raw))
}

pub async fn list_project_iam(provider: &dyn CloudProvider, project_id: &str) -> Result<Value> {
    LIST_PROJECT_IAM
        .run(
            &[("project_id", project_id)],
            fetch_project_policy(provider, project_id),
        )
        .await
}

pub async fn list_project_owners(provider: &dyn CloudProvider, project_id: &str) -> Result<Value> {
    LIST_PROJECT_OWNERS
        .run(&[("project_id", project_id)], async {
            let policy = fetch_project_policy(provider, project_id).await?;
            anyhow::Ok(posture::owners(&policy.bindings))
        })
        .await
}
