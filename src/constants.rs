//! # Constants
//!
//! Shared constants used throughout the crate.
//!
//! These values represent the naming convention's defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Primary environment variable holding the current stage (e.g. `test`, `prod`)
pub const STAGE_ENV_VAR: &str = "AWS_STAGE";

/// Fallback environment variable consulted when `AWS_STAGE` is unset
pub const STAGE_FALLBACK_ENV_VAR: &str = "NODE_ENV";

/// Version assumed when a short-form name omits one
pub const DEFAULT_VERSION: u32 = 1;

/// Region used when neither the caller nor the profile names one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Sentinel stored for boolean `true`
pub const TRUE_SENTINEL: &str = "__TRUE__";

/// Sentinel stored for boolean `false`
pub const FALSE_SENTINEL: &str = "__FALSE__";

/// Prefix of the wrapper used for numeric values, e.g. `NUMBER(5)`
pub const NUMBER_PREFIX: &str = "NUMBER(";

/// Suffix of the wrapper used for numeric values
pub const NUMBER_SUFFIX: &str = ")";

/// Name of the shared credentials file inside the credentials directory
pub const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Directory (relative to the home directory) holding the AWS credentials file
pub const AWS_CONFIG_DIR: &str = ".aws";
