//! # List Command
//!
//! Command to list parameters below a path.

use crate::output::{display_value, format_timestamp, write_json};
use anyhow::{Context, Result};
use aws_ssm::prelude::*;
use std::path::Path;

/// List parameters as a table
pub async fn list_command(
    ssm: &Ssm,
    options: ListOptions,
    show_values: bool,
    output: Option<&Path>,
) -> Result<()> {
    let root = options.path.clone().unwrap_or_else(|| "/".to_string());
    println!("Listing parameters under '{root}'...");

    let records = ssm
        .list(options)
        .await
        .with_context(|| format!("Failed to list parameters under '{root}'"))?;

    if records.is_empty() {
        println!("No parameters found.");
        return write_json(output, &records);
    }

    if show_values {
        println!(
            "\n{:<50} {:<8} {:<26} {}",
            "NAME", "VERSION", "LAST UPDATED", "VALUE"
        );
        println!("{}", "-".repeat(100));
        for record in &records {
            println!(
                "{:<50} {:<8} {:<26} {}",
                record.path,
                record.version,
                format_timestamp(record.last_modified.as_ref()),
                display_value(record)
            );
        }
    } else {
        println!(
            "\n{:<50} {:<8} {:<14} {}",
            "NAME", "VERSION", "TYPE", "LAST UPDATED"
        );
        println!("{}", "-".repeat(100));
        for record in &records {
            println!(
                "{:<50} {:<8} {:<14} {}",
                record.path,
                record.version,
                record.parameter_type.as_str(),
                format_timestamp(record.last_modified.as_ref())
            );
        }
    }
    println!("\n{} parameter(s)", records.len());

    write_json(output, &records)
}
