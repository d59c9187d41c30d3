//! # Types
//!
//! Records exchanged with the parameter store.

use crate::error::{Result, SsmError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage type of a parameter
///
/// `StringList` is accepted on read so foreign parameters can be listed, but this
/// crate only ever writes `String` or `SecureString` (values are JSON-serialized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
    String,
    StringList,
    SecureString,
}

impl ParameterType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "String",
            ParameterType::StringList => "StringList",
            ParameterType::SecureString => "SecureString",
        }
    }

    /// Whether values of this type are encrypted at rest
    #[must_use]
    pub fn is_encrypted(&self) -> bool {
        matches!(self, ParameterType::SecureString)
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = SsmError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "String" => Ok(ParameterType::String),
            "StringList" => Ok(ParameterType::StringList),
            "SecureString" => Ok(ParameterType::SecureString),
            other => Err(SsmError::InvalidFormat {
                message: format!(
                    "\"{other}\" is not a parameter type; expected String, StringList or SecureString"
                ),
            }),
        }
    }
}

/// A parameter as stored in / retrieved from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterRecord {
    /// Fully-qualified path, e.g. `/test/1/firebase/KEY`
    pub path: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    /// Value as returned by the store; ciphertext when `encrypted` is set
    pub value: String,
    pub arn: Option<String>,
    /// Monotonic version assigned by the store
    pub version: i64,
    pub last_modified: Option<DateTime<Utc>>,
    /// True when `value` is still ciphertext
    pub encrypted: bool,
    /// Module the record was grouped under by an aggregation call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Variable name the record was grouped under by an aggregation call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
}

impl ParameterRecord {
    /// Value suitable for exporting as an environment variable
    ///
    /// Refuses to hand out ciphertext: the record must have been fetched with
    /// decryption for encrypted parameters.
    pub fn env_value(&self) -> Result<&str> {
        if self.encrypted {
            return Err(SsmError::not_allowed(format!(
                "The parameter \"{}\" is encrypted; fetch it with decryption before converting it to an environment variable",
                self.path
            )));
        }
        Ok(&self.value)
    }

    /// Last path segment, i.e. the variable's own name
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(encrypted: bool) -> ParameterRecord {
        ParameterRecord {
            path: "/test/1/firebase/API_KEY".to_string(),
            parameter_type: ParameterType::SecureString,
            value: "abc".to_string(),
            arn: None,
            version: 1,
            last_modified: None,
            encrypted,
            module: None,
            variable: None,
        }
    }

    #[test]
    fn test_parameter_type_round_trips_through_str() {
        for t in [
            ParameterType::String,
            ParameterType::StringList,
            ParameterType::SecureString,
        ] {
            assert_eq!(t.as_str().parse::<ParameterType>().unwrap(), t);
        }
        assert!(matches!(
            "Secure".parse::<ParameterType>(),
            Err(SsmError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_env_value_refuses_ciphertext() {
        let err = record(true).env_value().unwrap_err();
        assert_eq!(err.code(), "aws-ssm/not-allowed");
        assert_eq!(record(false).env_value().unwrap(), "abc");
    }

    #[test]
    fn test_name_is_last_segment() {
        assert_eq!(record(false).name(), "API_KEY");
    }
}
