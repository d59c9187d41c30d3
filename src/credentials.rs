//! # Credentials
//!
//! Resolves an access key pair (and optional region) for a named profile from an
//! AWS shared-credentials file:
//!
//! ```ini
//! [ssm]
//! aws_access_key_id = AKIA...
//! aws_secret_access_key = ...
//! region = eu-west-1
//! ```

use crate::constants::{AWS_CONFIG_DIR, CREDENTIALS_FILE_NAME};
use crate::error::{Result, SsmError};
use regex::Regex;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(aws_access_key_id|aws_secret_access_key|region)\s*=\s*(.*?)\s*$")
        .expect("Failed to compile credentials key/value pattern - this should never happen")
});

/// Access key pair for one profile
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: Option<String>,
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("region", &self.region)
            .finish()
    }
}

impl AwsCredentials {
    /// Convert into the SDK's credential type
    #[must_use]
    pub fn to_sdk_credentials(&self) -> aws_credential_types::Credentials {
        aws_credential_types::Credentials::new(
            self.access_key_id.clone(),
            self.secret_access_key.clone(),
            None,
            None,
            "aws-ssm-credentials-file",
        )
    }
}

/// Something that can turn a profile name into credentials
pub trait CredentialResolver {
    fn resolve(&self, profile: &str) -> Result<AwsCredentials>;
}

/// Shared-credentials file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsFile {
    path: PathBuf,
}

impl CredentialsFile {
    /// `credentials` inside `directory`
    pub fn in_directory(directory: impl AsRef<Path>) -> Self {
        Self {
            path: directory.as_ref().join(CREDENTIALS_FILE_NAME),
        }
    }

    /// `~/.aws/credentials`, or `<directory>/credentials` when an override is given
    ///
    /// Fails when no override is given and the home directory cannot be determined.
    pub fn locate(directory_override: Option<&Path>) -> Result<Self> {
        match directory_override {
            Some(directory) => Ok(Self::in_directory(directory)),
            None => default_directory(home_var()).map(Self::in_directory),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialResolver for CredentialsFile {
    fn resolve(&self, profile: &str) -> Result<AwsCredentials> {
        let contents =
            std::fs::read_to_string(&self.path).map_err(|source| SsmError::CredentialsFile {
                path: self.path.clone(),
                source,
            })?;

        debug!(profile, path = %self.path.display(), "Resolving credentials");
        parse_profile(&contents, profile).ok_or_else(|| SsmError::CredentialsNotFound {
            profile: profile.to_string(),
            path: self.path.clone(),
        })
    }
}

/// Extract one profile's credentials from credentials-file text
///
/// Returns `None` when the profile has no section. Keys missing from the section
/// are left empty; the store rejects them on first use.
fn parse_profile(contents: &str, profile: &str) -> Option<AwsCredentials> {
    let mut found = false;
    let mut in_profile = false;
    let mut credentials = AwsCredentials {
        access_key_id: String::new(),
        secret_access_key: String::new(),
        region: None,
    };

    for line in contents.lines() {
        let trimmed = line.trim();
        if let Some(section) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            in_profile = section.trim() == profile;
            if in_profile {
                // A repeated section replaces the earlier one
                credentials.zeroize();
                found = true;
            }
            continue;
        }
        if !in_profile {
            continue;
        }
        if let Some(captures) = KEY_VALUE.captures(line) {
            let value = captures[2].to_string();
            match &captures[1] {
                "aws_access_key_id" => credentials.access_key_id = value,
                "aws_secret_access_key" => credentials.secret_access_key = value,
                _ => credentials.region = Some(value),
            }
        }
    }

    found.then_some(credentials)
}

fn home_var() -> Option<OsString> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
}

/// `<home>/.aws`
fn default_directory(home: Option<OsString>) -> Result<PathBuf> {
    match home {
        Some(home) => Ok(PathBuf::from(home).join(AWS_CONFIG_DIR)),
        None => {
            debug!("Neither HOME nor USERPROFILE is set");
            Err(SsmError::HomeDirectoryNotFound)
        }
    }
}
