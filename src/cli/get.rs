//! # Get Command
//!
//! Command to read a single parameter.

use crate::output::{display_value, format_timestamp, write_json};
use anyhow::{Context, Result};
use aws_ssm::prelude::*;
use std::path::Path;

/// Read one parameter and print it
pub async fn get_command(
    ssm: &Ssm,
    name: &str,
    options: &GetOptions,
    env: bool,
    output: Option<&Path>,
) -> Result<()> {
    let record = ssm
        .get(name, options)
        .await
        .with_context(|| format!("Failed to get parameter '{name}'"))?;

    if env {
        println!("{}={}", record.name(), record.env_value()?);
    } else {
        println!("{:<14} {}", "PATH", record.path);
        println!("{:<14} {}", "TYPE", record.parameter_type);
        println!("{:<14} {}", "VERSION", record.version);
        println!(
            "{:<14} {}",
            "LAST UPDATED",
            format_timestamp(record.last_modified.as_ref())
        );
        println!("{:<14} {}", "VALUE", display_value(&record));
        if record.encrypted {
            println!("\nValue is encrypted; pass --decrypt to see it.");
        }
    }

    write_json(output, &record)
}
