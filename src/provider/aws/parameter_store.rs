//! # AWS Parameter Store Client
//!
//! Client for interacting with AWS Systems Manager Parameter Store API.
//!
//! This module provides functionality to:
//! - Create and overwrite parameters (`String` and `SecureString`)
//! - Retrieve single parameters, optionally decrypted
//! - Retrieve every parameter below a path, following pagination
//! - Delete parameters

use super::{load_sdk_config, AwsClientOptions};
use crate::provider::{ParameterStoreClient, PutParameter, StoreError};
use crate::types::{ParameterRecord, ParameterType};
use async_trait::async_trait;
use aws_sdk_ssm::types::{Parameter, ParameterType as SdkParameterType};
use aws_sdk_ssm::Client as SsmClient;
use chrono::{DateTime, Utc};
use tracing::{debug, info, info_span, Instrument};

/// AWS Parameter Store provider implementation
pub struct AwsParameterStore {
    client: SsmClient,
    region: String,
}

impl std::fmt::Debug for AwsParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsParameterStore")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl AwsParameterStore {
    /// Create a new AWS Parameter Store client
    pub async fn new(options: &AwsClientOptions) -> Self {
        let sdk_config = load_sdk_config(options).await;
        info!("AWS Parameter Store client ready in region {}", options.region);
        Self {
            client: SsmClient::new(&sdk_config),
            region: options.region.clone(),
        }
    }

    /// Wrap an already configured SDK client
    #[must_use]
    pub fn from_client(client: SsmClient, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl ParameterStoreClient for AwsParameterStore {
    async fn get_parameter(&self, path: &str, decrypt: bool) -> Result<ParameterRecord, StoreError> {
        let span = info_span!("aws.parameter.get", parameter.name = path, region = self.region);

        async move {
            let response = self
                .client
                .get_parameter()
                .name(path)
                .with_decryption(decrypt)
                .send()
                .await;

            match response {
                Ok(output) => output
                    .parameter()
                    .map(|parameter| to_record(parameter, path, decrypt))
                    .ok_or_else(|| StoreError::NotFound(path.to_string())),
                Err(e) => {
                    let service_error = e.into_service_error();
                    if service_error.is_parameter_not_found() {
                        Err(StoreError::NotFound(path.to_string()))
                    } else {
                        Err(StoreError::Other(
                            anyhow::Error::new(service_error)
                                .context(format!("Failed to get AWS Parameter Store parameter {path}")),
                        ))
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn put_parameter(&self, request: PutParameter) -> Result<i64, StoreError> {
        info!(
            "Writing AWS Parameter Store parameter: {} (type: {}, overwrite: {})",
            request.path, request.parameter_type, request.overwrite
        );

        let output = self
            .client
            .put_parameter()
            .name(&request.path)
            .value(&request.value)
            .r#type(to_sdk_type(request.parameter_type))
            .overwrite(request.overwrite)
            .set_description(request.description.clone())
            .set_key_id(request.key_id.clone())
            .send()
            .await
            .map_err(|e| {
                StoreError::Other(anyhow::Error::new(e.into_service_error()).context(format!(
                    "Failed to write AWS Parameter Store parameter {}",
                    request.path
                )))
            })?;

        Ok(output.version())
    }

    async fn get_parameters_by_path(
        &self,
        path: &str,
        recursive: bool,
        decrypt: bool,
    ) -> Result<Vec<ParameterRecord>, StoreError> {
        let span = info_span!("aws.parameter.list", parameter.path = path, region = self.region);

        async move {
            let mut records = Vec::new();
            let mut next_token: Option<String> = None;

            loop {
                let output = self
                    .client
                    .get_parameters_by_path()
                    .path(path)
                    .recursive(recursive)
                    .with_decryption(decrypt)
                    .set_next_token(next_token.take())
                    .send()
                    .await
                    .map_err(|e| {
                        StoreError::Other(anyhow::Error::new(e.into_service_error()).context(
                            format!("Failed to list AWS Parameter Store parameters under {path}"),
                        ))
                    })?;

                records.extend(
                    output
                        .parameters()
                        .iter()
                        .map(|parameter| to_record(parameter, path, decrypt)),
                );

                match output.next_token() {
                    Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                    _ => break,
                }
            }

            debug!("Listed {} parameters under {}", records.len(), path);
            Ok(records)
        }
        .instrument(span)
        .await
    }

    async fn delete_parameter(&self, path: &str) -> Result<(), StoreError> {
        info!("Deleting AWS Parameter Store parameter: {}", path);
        match self.client.delete_parameter().name(path).send().await {
            Ok(_) => Ok(()),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_parameter_not_found() {
                    Err(StoreError::NotFound(path.to_string()))
                } else {
                    Err(StoreError::Other(
                        anyhow::Error::new(service_error)
                            .context(format!("Failed to delete AWS Parameter Store parameter {path}")),
                    ))
                }
            }
        }
    }
}

fn to_record(parameter: &Parameter, requested_path: &str, decrypt: bool) -> ParameterRecord {
    let parameter_type = parameter
        .r#type()
        .map_or(ParameterType::String, from_sdk_type);

    ParameterRecord {
        path: parameter.name().unwrap_or(requested_path).to_string(),
        parameter_type,
        value: parameter.value().unwrap_or_default().to_string(),
        arn: parameter.arn().map(ToString::to_string),
        version: parameter.version(),
        last_modified: parameter
            .last_modified_date()
            .and_then(|date| DateTime::<Utc>::from_timestamp(date.secs(), date.subsec_nanos())),
        encrypted: parameter_type.is_encrypted() && !decrypt,
        module: None,
        variable: None,
    }
}

fn from_sdk_type(sdk_type: &SdkParameterType) -> ParameterType {
    match sdk_type {
        SdkParameterType::SecureString => ParameterType::SecureString,
        SdkParameterType::StringList => ParameterType::StringList,
        _ => ParameterType::String,
    }
}

fn to_sdk_type(parameter_type: ParameterType) -> SdkParameterType {
    match parameter_type {
        ParameterType::String => SdkParameterType::String,
        ParameterType::StringList => SdkParameterType::StringList,
        ParameterType::SecureString => SdkParameterType::SecureString,
    }
}
