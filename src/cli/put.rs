//! # Put Command
//!
//! Command to write a parameter.

use crate::output::write_json;
use anyhow::{Context, Result};
use aws_ssm::prelude::*;
use serde_json::{json, Value};
use std::path::Path;

/// Write one parameter and report the version the store assigned
pub async fn put_command(
    ssm: &Ssm,
    name: &str,
    raw_value: &str,
    parse_json: bool,
    options: &PutOptions,
    output: Option<&Path>,
) -> Result<()> {
    let value = if parse_json {
        serde_json::from_str(raw_value)
            .with_context(|| format!("--json was given but '{raw_value}' is not valid JSON"))?
    } else {
        Value::String(raw_value.to_string())
    };

    let path = ssm.resolve_path(name, options.non_standard_path)?;
    let version = ssm
        .put(name, &value, options)
        .await
        .with_context(|| format!("Failed to put parameter '{path}'"))?;

    println!("Stored {path} (store version {version})");
    write_json(
        output,
        &json!({ "path": path, "version": version, "value": to_stored_string(&value) }),
    )
}
