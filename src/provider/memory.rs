//! # In-Memory Parameter Store
//!
//! Process-local [`ParameterStoreClient`] with the same observable semantics as
//! Parameter Store: monotonically increasing versions per path, overwrite
//! protection, hierarchical listing, and `SecureString` values that read back as
//! ciphertext unless decryption is requested.
//!
//! This is ephemeral - data does not persist across restarts.
//! Thread-safe using Arc<RwLock> for concurrent access.

use crate::provider::{ParameterStoreClient, PutParameter, StoreError};
use crate::types::{ParameterRecord, ParameterType};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// One stored parameter
#[derive(Debug, Clone)]
struct StoredParameter {
    value: String,
    parameter_type: ParameterType,
    version: i64,
    description: Option<String>,
    key_id: Option<String>,
    last_modified: DateTime<Utc>,
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryParameterStore {
    store: Arc<RwLock<BTreeMap<String, StoredParameter>>>,
}

impl InMemoryParameterStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of parameters held
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Description recorded for a path, if any
    pub async fn description(&self, path: &str) -> Option<String> {
        self.store
            .read()
            .await
            .get(path)
            .and_then(|p| p.description.clone())
    }

    /// KMS key recorded for a path, if any
    pub async fn key_id(&self, path: &str) -> Option<String> {
        self.store
            .read()
            .await
            .get(path)
            .and_then(|p| p.key_id.clone())
    }
}

#[async_trait]
impl ParameterStoreClient for InMemoryParameterStore {
    async fn get_parameter(&self, path: &str, decrypt: bool) -> Result<ParameterRecord, StoreError> {
        let store = self.store.read().await;
        store
            .get(path)
            .map(|stored| to_record(path, stored, decrypt))
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }

    async fn put_parameter(&self, request: PutParameter) -> Result<i64, StoreError> {
        let mut store = self.store.write().await;

        let version = match store.get(&request.path) {
            Some(_) if !request.overwrite => {
                return Err(StoreError::Other(anyhow::anyhow!(
                    "ParameterAlreadyExists: The parameter {} already exists",
                    request.path
                )));
            }
            Some(existing) => existing.version + 1,
            None => 1,
        };

        info!("  PUT parameter: {} (version {})", request.path, version);
        store.insert(
            request.path,
            StoredParameter {
                value: request.value,
                parameter_type: request.parameter_type,
                version,
                description: request.description,
                key_id: request.key_id,
                last_modified: Utc::now(),
            },
        );
        Ok(version)
    }

    async fn get_parameters_by_path(
        &self,
        path: &str,
        recursive: bool,
        decrypt: bool,
    ) -> Result<Vec<ParameterRecord>, StoreError> {
        let prefix = format!("{}/", path.trim_end_matches('/'));
        let store = self.store.read().await;

        Ok(store
            .iter()
            .filter(|(key, _)| {
                key.strip_prefix(&prefix)
                    .is_some_and(|rest| recursive || !rest.contains('/'))
            })
            .map(|(key, stored)| to_record(key, stored, decrypt))
            .collect())
    }

    async fn delete_parameter(&self, path: &str) -> Result<(), StoreError> {
        info!("  DELETE parameter: {}", path);
        self.store
            .write()
            .await
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }
}

fn to_record(path: &str, stored: &StoredParameter, decrypt: bool) -> ParameterRecord {
    let encrypted = stored.parameter_type.is_encrypted() && !decrypt;
    ParameterRecord {
        path: path.to_string(),
        parameter_type: stored.parameter_type,
        value: if encrypted {
            pseudo_ciphertext(&stored.value)
        } else {
            stored.value.clone()
        },
        arn: Some(format!(
            "arn:aws:ssm:us-east-1:123456789012:parameter{path}"
        )),
        version: stored.version,
        last_modified: Some(stored.last_modified),
        encrypted,
        module: None,
        variable: None,
    }
}

/// Opaque stand-in for KMS ciphertext
fn pseudo_ciphertext(value: &str) -> String {
    value
        .bytes()
        .fold(String::from("AQICAH"), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
}
