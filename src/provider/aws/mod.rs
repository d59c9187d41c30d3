//! # AWS Provider
//!
//! SDK configuration for talking to AWS Systems Manager.
//!
//! Credentials come either from an explicit key pair (resolved from a named
//! profile in the shared credentials file) or from the SDK's default provider
//! chain (environment, SSO, instance metadata, IRSA, ...).

use crate::credentials::AwsCredentials;
use aws_config::SdkConfig;
use tracing::info;

/// Connection settings for [`AwsParameterStore`]
#[derive(Debug, Clone, Default)]
pub struct AwsClientOptions {
    pub region: String,
    /// Explicit key pair; the default credential chain is used when absent
    pub credentials: Option<AwsCredentials>,
    /// Endpoint override, e.g. a local SSM-compatible server
    pub endpoint_url: Option<String>,
}

/// Build an SDK config from the options
pub async fn load_sdk_config(options: &AwsClientOptions) -> SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(options.region.clone()));

    if let Some(credentials) = &options.credentials {
        info!(
            "Using explicit credentials for access key {}",
            credentials.access_key_id
        );
        loader = loader.credentials_provider(credentials.to_sdk_credentials());
    } else {
        info!("No explicit credentials configured, using the default AWS credential chain");
    }

    if let Some(endpoint) = &options.endpoint_url {
        info!("Overriding SSM endpoint to {}", endpoint);
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}

// Export Parameter Store provider
pub mod parameter_store;
pub use parameter_store::AwsParameterStore;
