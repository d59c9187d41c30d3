//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ## Usage
//!
//! ```rust
//! use aws_ssm::prelude::*;
//! ```

pub use crate::coercion::{from_stored_string, to_stored_string};
pub use crate::config::{SsmConfig, StageContext, StageSource};
pub use crate::error::{Result, SsmError};
pub use crate::naming::{build, parse, PathParts, RawName};
pub use crate::provider::memory::InMemoryParameterStore;
pub use crate::provider::{ParameterStoreClient, PutParameter, StoreError};
pub use crate::ssm::{
    DeleteOptions, GetOptions, ListOptions, ModuleOptions, PutOptions, Ssm, SsmConfiguration,
};
pub use crate::types::{ParameterRecord, ParameterType};
pub use crate::versions::{ModuleVariables, ModuleVersionIndex};
