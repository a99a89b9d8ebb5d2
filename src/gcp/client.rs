//! GCP Client
//!
//! REST implementation of [`CloudProvider`], combining a token source and the
//! HTTP wrapper. A client is built per invocation and dropped when it returns.

use super::auth::{AdcCredentials, TokenSource};
use super::http::GcpHttpClient;
use super::provider::CloudProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on pages followed by a single list call
const MAX_PAGES: usize = 1000;

/// API endpoints, overridable so tests can point at a mock server
#[derive(Debug, Clone)]
pub struct BaseUrls {
    pub compute: String,
    pub storage: String,
    pub resourcemanager: String,
}

impl Default for BaseUrls {
    fn default() -> Self {
        Self {
            compute: "https://compute.googleapis.com".into(),
            storage: "https://storage.googleapis.com".into(),
            resourcemanager: "https://cloudresourcemanager.googleapis.com".into(),
        }
    }
}

impl BaseUrls {
    /// Every API served from the same root
    pub fn single(root: &str) -> Self {
        let root = root.trim_end_matches('/').to_string();
        Self {
            compute: root.clone(),
            storage: root.clone(),
            resourcemanager: root,
        }
    }
}

/// Main GCP client
#[derive(Clone)]
pub struct GcpClient {
    token: Arc<dyn TokenSource>,
    http: GcpHttpClient,
    base: BaseUrls,
    max_pages: usize,
}

impl GcpClient {
    /// Create a client authenticated with Application Default Credentials
    pub async fn new(timeout: Duration) -> Result<Self> {
        let credentials = AdcCredentials::new()
            .await
            .context("Failed to initialize GCP credentials")?;

        Self::with_token_source(Arc::new(credentials), BaseUrls::default(), timeout)
    }

    /// Create a client from an explicit token source and endpoints
    pub fn with_token_source(
        token: Arc<dyn TokenSource>,
        base: BaseUrls,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            token,
            http: GcpHttpClient::new(timeout)?,
            base,
            max_pages: MAX_PAGES,
        })
    }

    /// Lower the page cap for list calls
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Make a GET request to a GCP API
    pub async fn get(&self, url: &str) -> Result<Value> {
        let token = self.token.token().await?;
        self.http.get(url, &token).await
    }

    /// Make a POST request to a GCP API
    pub async fn post(&self, url: &str, body: Option<&Value>) -> Result<Value> {
        let token = self.token.token().await?;
        self.http.post(url, &token, body).await
    }

    /// Follow `nextPageToken` until exhausted, collecting every `items` entry
    ///
    /// Hitting the page cap is an error, never a partial listing.
    pub async fn list_all(&self, url: &str) -> Result<Vec<Value>> {
        let mut all_items = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..self.max_pages {
            let page_url = match page_token.as_deref() {
                Some(token) => with_query_param(url, "pageToken", token),
                None => url.to_string(),
            };
            let response = self.get(&page_url).await?;

            if let Some(items) = response.get("items").and_then(|v| v.as_array()) {
                all_items.extend(items.iter().cloned());
            }

            page_token = response
                .get("nextPageToken")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string());

            if page_token.is_none() {
                return Ok(all_items);
            }
        }

        tracing::warn!(url, pages = self.max_pages, "Page limit reached");
        anyhow::bail!(
            "Listing {} exceeded {} pages; refusing to return a partial result",
            url,
            self.max_pages
        )
    }

    // =========================================================================
    // Compute Engine API helpers
    // =========================================================================

    /// Build Compute Engine API URL
    pub fn compute_url(&self, project: &str, path: &str) -> String {
        format!(
            "{}/compute/v1/projects/{}/{}",
            self.base.compute,
            urlencoding::encode(project),
            path
        )
    }

    /// Build zonal Compute Engine API URL
    pub fn compute_zonal_url(&self, project: &str, zone: &str, resource: &str) -> String {
        self.compute_url(
            project,
            &format!("zones/{}/{}", urlencoding::encode(zone), resource),
        )
    }

    /// Build global Compute Engine API URL
    pub fn compute_global_url(&self, project: &str, resource: &str) -> String {
        self.compute_url(project, &format!("global/{}", resource))
    }

    // =========================================================================
    // Cloud Storage API helpers
    // =========================================================================

    /// Build Cloud Storage API URL
    pub fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.base.storage, path)
    }

    /// Build Cloud Storage bucket URL
    pub fn storage_bucket_url(&self, bucket: &str) -> String {
        self.storage_url(&format!("b/{}", urlencoding::encode(bucket)))
    }

    // =========================================================================
    // Resource Manager API helpers
    // =========================================================================

    /// Build Resource Manager API URL
    pub fn resourcemanager_url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base.resourcemanager, path)
    }
}

#[async_trait]
impl CloudProvider for GcpClient {
    async fn list_firewalls(&self, project: &str) -> Result<Vec<Value>> {
        let url = self.compute_global_url(project, "firewalls");
        self.list_all(&url).await
    }

    async fn get_firewall(&self, project: &str, name: &str) -> Result<Value> {
        let url = self.compute_global_url(
            project,
            &format!("firewalls/{}", urlencoding::encode(name)),
        );
        self.get(&url).await
    }

    async fn list_instances(&self, project: &str, zone: &str) -> Result<Vec<Value>> {
        let url = self.compute_zonal_url(project, zone, "instances");
        self.list_all(&url).await
    }

    async fn get_instance(&self, project: &str, zone: &str, name: &str) -> Result<Value> {
        let url = self.compute_zonal_url(
            project,
            zone,
            &format!("instances/{}", urlencoding::encode(name)),
        );
        self.get(&url).await
    }

    async fn list_buckets(&self, project: &str) -> Result<Vec<Value>> {
        let url = with_query_param(&self.storage_url("b"), "project", project);
        self.list_all(&url).await
    }

    async fn get_bucket(&self, bucket: &str) -> Result<Value> {
        let url = self.storage_bucket_url(bucket);
        self.get(&url).await
    }

    async fn get_bucket_iam_policy(&self, bucket: &str) -> Result<Value> {
        let url = format!("{}/iam", self.storage_bucket_url(bucket));
        self.get(&url).await
    }

    async fn get_project_iam_policy(&self, project: &str) -> Result<Value> {
        let url = self.resourcemanager_url(&format!(
            "projects/{}:getIamPolicy",
            urlencoding::encode(project)
        ));
        self.post(&url, Some(&serde_json::json!({}))).await
    }
}

/// Append `key=value` to a URL, respecting an existing query string
fn with_query_param(url: &str, key: &str, value: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", url, separator, key, urlencoding::encode(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcp::auth::StaticToken;

    fn client() -> GcpClient {
        GcpClient::with_token_source(
            Arc::new(StaticToken("t".into())),
            BaseUrls::single("http://localhost:1/"),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_url_builders() {
        let c = client();
        assert_eq!(
            c.compute_zonal_url("p-123456", "us-central1-a", "instances"),
            "http://localhost:1/compute/v1/projects/p-123456/zones/us-central1-a/instances"
        );
        assert_eq!(
            c.compute_global_url("p-123456", "firewalls"),
            "http://localhost:1/compute/v1/projects/p-123456/global/firewalls"
        );
        assert_eq!(
            c.storage_bucket_url("my bucket"),
            "http://localhost:1/storage/v1/b/my%20bucket"
        );
        assert_eq!(
            c.resourcemanager_url("projects/p:getIamPolicy"),
            "http://localhost:1/v1/projects/p:getIamPolicy"
        );
    }

    #[test]
    fn test_with_query_param() {
        assert_eq!(with_query_param("http://x/b", "project", "p"), "http://x/b?project=p");
        assert_eq!(
            with_query_param("http://x/b?project=p", "pageToken", "a/b"),
            "http://x/b?project=p&pageToken=a%2Fb"
        );
    }
}
