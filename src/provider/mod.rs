//! # Provider Modules
//!
//! The parameter store is an external collaborator reached through the
//! [`ParameterStoreClient`] trait.
//!
//! Implementations:
//! - [`aws::AwsParameterStore`] talks to AWS Systems Manager Parameter Store
//! - [`memory::InMemoryParameterStore`] keeps parameters in process, for tests and dry runs

use crate::types::{ParameterRecord, ParameterType};
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a parameter store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested path does not exist
    #[error("Parameter {0} not found")]
    NotFound(String),
    /// Anything else; propagated unchanged
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Arguments of a write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutParameter {
    pub path: String,
    pub value: String,
    pub parameter_type: ParameterType,
    /// Allow replacing an existing value (creates a new store version)
    pub overwrite: bool,
    pub description: Option<String>,
    /// KMS key used for `SecureString`; the account default when absent
    pub key_id: Option<String>,
}

/// Provider trait for parameter stores
#[async_trait]
pub trait ParameterStoreClient: Send + Sync {
    /// Fetch a single parameter, optionally decrypting `SecureString` values
    async fn get_parameter(&self, path: &str, decrypt: bool) -> Result<ParameterRecord, StoreError>;

    /// Write a parameter and return the version assigned by the store
    ///
    /// Writing to an existing path without `overwrite` must fail.
    async fn put_parameter(&self, request: PutParameter) -> Result<i64, StoreError>;

    /// All parameters below `path`, following every page of results
    async fn get_parameters_by_path(
        &self,
        path: &str,
        recursive: bool,
        decrypt: bool,
    ) -> Result<Vec<ParameterRecord>, StoreError>;

    /// Remove a parameter
    async fn delete_parameter(&self, path: &str) -> Result<(), StoreError>;
}

pub mod aws;
pub mod memory;
