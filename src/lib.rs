//! AWS SSM Parameter Store Library
//!
//! Get, put, list and delete AWS Parameter Store values using a hierarchical
//! naming convention:
//!
//! ```text
//! / {stage} / {version} / [ {module} / ] {NAME}
//! ```
//!
//! Callers may use short names (`FOO`, `firebase/FOO`) which are fleshed out
//! from the ambient stage, or fully-qualified names (`test/1/firebase/FOO`).
//! Tests are included in the module files and under `tests/`.
//!
//! ## Quick Start
//!
//! ```rust
//! use aws_ssm::prelude::*;
//! ```

pub mod coercion;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod naming;
pub mod prelude;
pub mod provider;
pub mod ssm;
pub mod types;
pub mod versions;

pub use error::{Result, SsmError};
pub use ssm::Ssm;
