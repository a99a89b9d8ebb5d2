//! GCP API interaction module
//!
//! The external provider boundary: authentication, the REST client and the
//! typed errors it produces.
//!
//! # Module Structure
//!
//! - [`auth`] - Token sources and gcloud defaults
//! - [`client`] - REST implementation of [`provider::CloudProvider`]
//! - [`error`] - Typed API errors and failure classification
//! - [`http`] - HTTP utilities for REST API calls
//! - [`provider`] - The read-only query surface the core consumes
//!
//! # Example
//!
//! ```ignore
//! use gcp_posture::gcp::{client::GcpClient, provider::CloudProvider};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = GcpClient::new(std::time::Duration::from_secs(30)).await?;
//!     let rules = client.list_firewalls("my-project").await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod provider;

pub use error::{FailureClass, GcpError};
pub use provider::CloudProvider;
