//! # Delete Command
//!
//! Command to remove a parameter.

use anyhow::{Context, Result};
use aws_ssm::prelude::*;

pub async fn delete_command(ssm: &Ssm, name: &str, options: &DeleteOptions) -> Result<()> {
    let path = ssm.resolve_path(name, options.non_standard_path)?;
    ssm.delete(name, options)
        .await
        .with_context(|| format!("Failed to delete parameter '{path}'"))?;
    println!("Deleted {path}");
    Ok(())
}
