//! # Parameter Store Facade
//!
//! [`Ssm`] applies the naming convention, value coercion and version resolution
//! around a [`ParameterStoreClient`].
//!
//! ```rust,no_run
//! use aws_ssm::prelude::*;
//! use serde_json::json;
//!
//! # async fn run() -> aws_ssm::Result<()> {
//! let ssm = Ssm::from_config(SsmConfig::default().with_profile("ssm")).await?;
//! ssm.put("firebase/API_KEY", &json!("abc"), &PutOptions::default()).await?;
//! let firebase = ssm.modules(&["firebase"], &ModuleOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

use crate::coercion::to_stored_string;
use crate::config::{SsmConfig, StageSource};
use crate::credentials::{CredentialResolver, CredentialsFile};
use crate::error::{Result, SsmError};
use crate::naming::{self, normalize_path};
use crate::provider::aws::{AwsClientOptions, AwsParameterStore};
use crate::provider::{ParameterStoreClient, PutParameter, StoreError};
use crate::types::{ParameterRecord, ParameterType};
use crate::versions::{self, ModuleVariables, ModuleVersionIndex};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Options for [`Ssm::get`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOptions {
    /// Ask the store to decrypt `SecureString` values
    pub decrypt: bool,
    /// Use the name verbatim instead of applying the naming convention
    pub non_standard_path: bool,
}

/// Options for [`Ssm::put`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutOptions {
    pub description: Option<String>,
    /// Replace an existing value, creating a new store version
    pub override_existing: bool,
    /// `Some(true)` stores a `SecureString`, `Some(false)` a `String`; `None` uses the configured default
    pub encrypt: Option<bool>,
    /// KMS key for encryption; the account's default key when absent
    pub encryption_key: Option<String>,
    pub non_standard_path: bool,
}

/// Options for [`Ssm::list`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Hierarchy to list below; the whole store when absent
    pub path: Option<String>,
    /// Keep only parameters whose path contains this text
    pub contains: Option<String>,
    pub decrypt: bool,
}

impl From<&str> for ListOptions {
    fn from(path: &str) -> Self {
        Self {
            path: Some(path.to_string()),
            ..Self::default()
        }
    }
}

/// Options for [`Ssm::delete`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    pub non_standard_path: bool,
}

/// Options for [`Ssm::modules`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleOptions {
    /// Pin every module to this version instead of the latest
    pub version: Option<u32>,
    /// Return full records instead of bare values
    pub verbose: bool,
}

/// Snapshot of the facade's effective configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsmConfiguration {
    pub region: String,
    pub profile: Option<String>,
    pub explicit_credentials: bool,
    pub cli: bool,
    pub default_type: ParameterType,
}

pub struct Ssm {
    client: Arc<dyn ParameterStoreClient>,
    config: SsmConfig,
    region: String,
    explicit_credentials: bool,
    stage: StageSource,
}

impl std::fmt::Debug for Ssm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ssm")
            .field("region", &self.region)
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}

/// Resolve the connection settings a config describes
///
/// A configured profile is looked up in the shared credentials file; its region
/// is used unless the config names one explicitly.
pub fn aws_client_options(config: &SsmConfig) -> Result<AwsClientOptions> {
    let credentials = match &config.profile {
        Some(profile) => Some(
            CredentialsFile::locate(config.credentials_directory.as_deref())?.resolve(profile)?,
        ),
        None => None,
    };
    let region = config.resolve_region(credentials.as_ref().and_then(|c| c.region.as_deref()));

    Ok(AwsClientOptions {
        region,
        credentials,
        endpoint_url: None,
    })
}

impl Ssm {
    /// Connect to AWS Parameter Store as described by `config`
    pub async fn from_config(config: SsmConfig) -> Result<Self> {
        let options = aws_client_options(&config)?;
        Ok(Self::connect(config, &options).await)
    }

    /// Connect to AWS Parameter Store with explicit connection settings
    pub async fn connect(config: SsmConfig, options: &AwsClientOptions) -> Self {
        let client = AwsParameterStore::new(options).await;
        let mut ssm = Self::new(Arc::new(client), config);
        ssm.region.clone_from(&options.region);
        ssm.explicit_credentials = options.credentials.is_some();
        ssm
    }

    /// Wrap any store client
    pub fn new(client: Arc<dyn ParameterStoreClient>, config: SsmConfig) -> Self {
        let region = config.resolve_region(None);
        Self {
            client,
            config,
            region,
            explicit_credentials: false,
            stage: StageSource::default(),
        }
    }

    /// Replace where the ambient stage comes from
    #[must_use]
    pub fn with_stage_source(mut self, stage: StageSource) -> Self {
        self.stage = stage;
        self
    }

    #[must_use]
    pub fn configuration(&self) -> SsmConfiguration {
        SsmConfiguration {
            region: self.region.clone(),
            profile: self.config.profile.clone(),
            explicit_credentials: self.explicit_credentials,
            cli: self.config.cli,
            default_type: self.config.default_type,
        }
    }

    /// Fully-qualified store path for a caller-supplied name
    pub fn resolve_path(&self, name: &str, non_standard_path: bool) -> Result<String> {
        if non_standard_path {
            return Ok(normalize_path(name));
        }
        let parts = naming::parse(name, &self.stage.current(), false)?;
        Ok(naming::build(&parts))
    }

    /// Fetch one parameter
    ///
    /// The result is flagged `encrypted` when the parameter is a `SecureString` and
    /// decryption was not requested.
    pub async fn get(&self, name: &str, options: &GetOptions) -> Result<ParameterRecord> {
        let path = self.resolve_path(name, options.non_standard_path)?;
        debug!(name, path = %path, decrypt = options.decrypt, "Getting parameter");

        let mut record = self
            .client
            .get_parameter(&path, options.decrypt)
            .await
            .map_err(|e| store_error(e, &path))?;
        record.encrypted = record.parameter_type.is_encrypted() && !options.decrypt;
        Ok(record)
    }

    /// Write a value, returning the version the store assigned
    pub async fn put(&self, name: &str, value: &Value, options: &PutOptions) -> Result<i64> {
        let path = self.resolve_path(name, options.non_standard_path)?;
        let parameter_type = match options.encrypt {
            Some(true) => ParameterType::SecureString,
            Some(false) => ParameterType::String,
            None => self.config.default_type,
        };

        let request = PutParameter {
            path: path.clone(),
            value: to_stored_string(value),
            parameter_type,
            overwrite: options.override_existing,
            description: options.description.clone(),
            key_id: options.encryption_key.clone(),
        };

        let version = self
            .client
            .put_parameter(request)
            .await
            .map_err(|e| store_error(e, &path))?;
        info!("Stored parameter {} as version {}", path, version);
        Ok(version)
    }

    /// Every parameter below a path, recursively
    pub async fn list(&self, options: impl Into<ListOptions>) -> Result<Vec<ParameterRecord>> {
        let options = options.into();
        let path = normalize_path(options.path.as_deref().unwrap_or("/"));

        let mut records = self
            .client
            .get_parameters_by_path(&path, true, options.decrypt)
            .await
            .map_err(|e| store_error(e, &path))?;

        if let Some(needle) = &options.contains {
            records.retain(|record| record.path.contains(needle.as_str()));
        }
        debug!("Listed {} parameters under {}", records.len(), path);
        Ok(records)
    }

    /// [`Ssm::list`] with decryption forced on
    pub async fn values(&self, path: Option<&str>) -> Result<Vec<ParameterRecord>> {
        self.list(ListOptions {
            path: path.map(ToString::to_string),
            contains: None,
            decrypt: true,
        })
        .await
    }

    /// Variables of the named modules for the current stage
    ///
    /// Every requested module appears in the result; modules with no parameters map
    /// to an empty set of variables.
    pub async fn modules(
        &self,
        names: &[&str],
        options: &ModuleOptions,
    ) -> Result<BTreeMap<String, ModuleVariables>> {
        let context = self.stage.current();
        let stage = context.stage().ok_or_else(|| {
            SsmError::not_allowed(
                "modules() requires a stage; set AWS_STAGE or NODE_ENV before requesting modules",
            )
        })?;

        let records = self.values(Some(&format!("/{stage}"))).await?;
        let index = ModuleVersionIndex::from_records(records);

        let mut result = BTreeMap::new();
        for &name in names {
            let variables = match (index.module(name), options.version) {
                (Some(versions), Some(version)) => {
                    versions::specific(name, versions, version, options.verbose)?
                }
                (Some(versions), None) => versions::latest(versions, options.verbose),
                (None, _) => ModuleVariables::empty(options.verbose),
            };
            result.insert(name.to_string(), variables);
        }
        Ok(result)
    }

    /// Remove a parameter
    pub async fn delete(&self, name: &str, options: &DeleteOptions) -> Result<()> {
        let path = self.resolve_path(name, options.non_standard_path)?;
        self.client
            .delete_parameter(&path)
            .await
            .map_err(|e| store_error(e, &path))?;
        info!("Deleted parameter {}", path);
        Ok(())
    }
}

fn store_error(error: StoreError, path: &str) -> SsmError {
    match error {
        StoreError::NotFound(_) => SsmError::ParameterNotFound {
            name: path.to_string(),
        },
        StoreError::Other(e) => SsmError::Store(e),
    }
}
