//! Read-only GCP introspection and security-posture checks.
//!
//! Data flows provider → [`resource`] (canonical records) → [`posture`]
//! (rules) → caller, and every agent-facing operation in [`tools`] runs
//! through [`outcome::guard`], the only place failures are translated.

pub mod config;
pub mod gcp;
pub mod logging;
pub mod outcome;
pub mod posture;
pub mod resource;
pub mod tools;

/// Version injected at compile time via GCP_POSTURE_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("GCP_POSTURE_VERSION") {
    Some(v) => v,
    None => "dev",
};
