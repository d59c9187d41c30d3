//! # Errors
//!
//! Closed error taxonomy for the library. Every variant carries a stable string
//! code (see [`SsmError::code`]) alongside its human-readable message so callers can
//! either match exhaustively or surface the code verbatim.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SsmError {
    /// A short-form name needs the ambient stage but none is set
    #[error(
        "You must set an environment stage before using the SSM api (name: \"{name}\"). \
         To do this, set either AWS_STAGE or NODE_ENV. Alternatively use a non-standard \
         path to bypass the naming convention."
    )]
    NotReady { name: String },

    /// Wrong number of segments or a non-numeric version segment
    #[error("{message}")]
    InvalidFormat { message: String },

    /// An explicit version was requested but the module has no such version
    #[error("Version {version} of module \"{module}\" was not found")]
    VersionNotFound { module: String, version: u32 },

    /// The store reports that the target path does not exist
    #[error("The parameter \"{name}\" could not be found!")]
    ParameterNotFound { name: String },

    /// An operation-specific precondition was not met
    #[error("{message}")]
    NotAllowed { message: String },

    /// The named profile is absent from the credentials source
    #[error("Profile \"{profile}\" was not found in credentials file {}", path.display())]
    CredentialsNotFound { profile: String, path: PathBuf },

    /// No credentials directory was given and the home directory is unknown
    #[error(
        "Could not determine the home directory to find the AWS credentials file; \
         set HOME or pass an explicit credentials directory"
    )]
    HomeDirectoryNotFound,

    /// The credentials source could not be read
    #[error("Failed to read credentials file {}", path.display())]
    CredentialsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other failure reported by the parameter store, propagated unchanged
    #[error("Parameter store request failed: {0}")]
    Store(#[source] anyhow::Error),
}

impl SsmError {
    /// Stable machine-readable code for this error kind
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SsmError::NotReady { .. } => "aws-ssm/not-ready",
            SsmError::InvalidFormat { .. } => "aws-ssm/invalid-format",
            SsmError::VersionNotFound { .. } => "aws-ssm/version-not-found",
            SsmError::ParameterNotFound { .. } => "aws-ssm/parameter-not-found",
            SsmError::NotAllowed { .. } => "aws-ssm/not-allowed",
            SsmError::CredentialsNotFound { .. } => "aws-ssm/empty-array",
            SsmError::HomeDirectoryNotFound => "aws-ssm/home-directory-not-found",
            SsmError::CredentialsFile { .. } => "aws-ssm/credentials-file",
            SsmError::Store(_) => "aws-ssm/store",
        }
    }

    pub(crate) fn not_allowed(message: impl Into<String>) -> Self {
        SsmError::NotAllowed {
            message: message.into(),
        }
    }
}

pub type Result<T, E = SsmError> = std::result::Result<T, E>;
