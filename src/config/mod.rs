//! # Configuration
//!
//! Client-level settings and the ambient stage.
//!
//! All settings have sensible defaults and can be overridden via environment variables.

mod stage;

pub use stage::{StageContext, StageSource};

use crate::constants::DEFAULT_REGION;
use crate::types::ParameterType;
use std::path::PathBuf;

/// Client-level configuration for [`crate::Ssm`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsmConfig {
    /// Explicit region; overrides the profile's region when set
    pub region: Option<String>,
    /// Profile name looked up in the shared credentials file
    pub profile: Option<String>,
    /// Directory containing the `credentials` file (defaults to `~/.aws`)
    pub credentials_directory: Option<PathBuf>,
    /// Type used by `put` when the caller does not say whether to encrypt
    pub default_type: ParameterType,
    /// Whether results are destined for a terminal rather than a program
    pub cli: bool,
}

impl Default for SsmConfig {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            credentials_directory: None,
            default_type: ParameterType::SecureString,
            cli: false,
        }
    }
}

impl SsmConfig {
    /// Load configuration from environment variables with defaults
    ///
    /// `AWS_PROFILE` is not read; the SDK's default credential chain handles it.
    pub fn from_env() -> Self {
        Self {
            region: env_var_non_empty("AWS_REGION").or_else(|| env_var_non_empty("AWS_DEFAULT_REGION")),
            profile: None,
            credentials_directory: None,
            default_type: env_var_or_default("AWS_SSM_DEFAULT_TYPE", ParameterType::SecureString),
            cli: false,
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_credentials_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.credentials_directory = Some(directory.into());
        self
    }

    /// Region to talk to: explicit region, then the profile's, then `us-east-1`
    #[must_use]
    pub fn resolve_region(&self, profile_region: Option<&str>) -> String {
        self.region
            .as_deref()
            .or(profile_region)
            .unwrap_or(DEFAULT_REGION)
            .to_string()
    }
}

/// Read environment variable or return default value
fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Read environment variable, treating an empty value as unset
fn env_var_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
