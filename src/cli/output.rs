//! # Output
//!
//! JSON file output and shared formatting for command results.

use anyhow::{Context, Result};
use aws_ssm::prelude::ParameterRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write `value` as pretty JSON when an output file was requested
pub fn write_json<T: Serialize>(output: Option<&Path>, value: &T) -> Result<()> {
    let Some(path) = output else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// `16 Oct 2026 3:04 PM UTC`, or `-` when the store did not say
pub fn format_timestamp(timestamp: Option<&DateTime<Utc>>) -> String {
    timestamp.map_or_else(
        || "-".to_string(),
        |t| t.format("%d %b %Y %-I:%M %p %Z").to_string(),
    )
}

/// Value column text; encrypted values are masked
pub fn display_value(record: &ParameterRecord) -> &str {
    if record.encrypted {
        "<encrypted>"
    } else {
        &record.value
    }
}
