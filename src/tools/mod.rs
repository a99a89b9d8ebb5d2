//! Agent-facing operations
//!
//! Each operation asks the provider for raw resources, canonicalizes them,
//! optionally runs a posture rule, and returns JSON through the outcome guard.
//!
//! # Architecture
//!
//! - [`registry`] - Operation names, declared result shapes and parameters
//! - [`dispatch`] - Invoke an operation by name with string arguments
//! - [`compute`] - Instances and firewall rules
//! - [`storage`] - Buckets
//! - [`iam`] - Project IAM policy
//!
//! # Example
//!
//! ```ignore
//! use gcp_posture::tools;
//!
//! async fn audit(provider: &dyn gcp_posture::gcp::CloudProvider) -> anyhow::Result<()> {
//!     let exposed = tools::compute::unsafe_ssh_exposure(provider, "my-project").await?;
//!     println!("{}", exposed);
//!     Ok(())
//! }
//! ```

pub mod compute;
pub mod dispatch;
pub mod iam;
pub mod registry;
pub mod storage;

pub use dispatch::{invoke, parse_args};
pub use registry::{get_all_operation_names, get_operation, Operation, OPERATIONS};
