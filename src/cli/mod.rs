//! # SSM CLI
//!
//! Command-line interface for reading and writing stage-scoped parameters in
//! AWS Systems Manager Parameter Store.
//!
//! ## Usage
//!
//! ```bash
//! # Read a variable for the current stage (AWS_STAGE / NODE_ENV)
//! ssm get firebase/API_KEY --decrypt
//!
//! # Read a pinned version for an explicit stage
//! ssm get /prod/2/firebase/API_KEY
//!
//! # Write a value (encrypted unless --plain)
//! ssm put firebase/API_KEY abc123 --description "Firebase web key"
//!
//! # List everything below a stage with decrypted values
//! ssm list /prod --show-values
//!
//! # Remove a parameter
//! ssm delete /prod/1/firebase/API_KEY
//! ```

use anyhow::{Context, Result};
use aws_ssm::prelude::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod delete;
mod get;
mod list;
mod output;
mod put;

/// Stage-scoped AWS Parameter Store CLI
#[derive(Parser)]
#[command(name = "ssm")]
#[command(
    about = "Get, put, list and delete stage-scoped parameters in AWS SSM Parameter Store",
    long_about = None,
    after_help = "\
Names:
  NAME                          current stage, version 1
  MODULE/NAME                   current stage, version 1, inside MODULE
  /STAGE/VERSION/[MODULE/]NAME  fully qualified

Examples:
  ssm get firebase/API_KEY --decrypt
  ssm put /test/1/firebase/API_KEY abc123 --override
  ssm list /prod --show-values
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Profile in ~/.aws/credentials (defaults to the SDK credential chain)
    #[arg(short, long, global = true)]
    profile: Option<String>,

    /// AWS region (defaults to the profile's region, then us-east-1)
    #[arg(short, long, global = true)]
    region: Option<String>,

    /// Also write the result as JSON to this file
    #[arg(short, long, global = true, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Stage for short names, instead of AWS_STAGE / NODE_ENV
    #[arg(long, global = true)]
    stage: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a single parameter
    Get {
        #[arg(value_name = "NAME")]
        name: String,

        /// Decrypt SecureString values
        #[arg(short, long)]
        decrypt: bool,

        /// Print as NAME=value for use in a shell environment
        #[arg(long)]
        env: bool,

        /// Use NAME verbatim instead of applying the stage/version convention
        #[arg(long)]
        non_standard: bool,
    },
    /// Write a parameter
    Put {
        #[arg(value_name = "NAME")]
        name: String,

        #[arg(value_name = "VALUE")]
        value: String,

        #[arg(long)]
        description: Option<String>,

        /// Overwrite an existing value, creating a new store version
        #[arg(long = "override")]
        override_existing: bool,

        /// Store as SecureString
        #[arg(long, conflicts_with = "plain")]
        encrypt: bool,

        /// Store as a plain String
        #[arg(long)]
        plain: bool,

        /// KMS key used for encryption
        #[arg(long, value_name = "KEY_ID")]
        key: Option<String>,

        /// Parse VALUE as JSON (numbers, booleans, objects and arrays are stored with their type)
        #[arg(long)]
        json: bool,

        #[arg(long)]
        non_standard: bool,
    },
    /// List parameters below a path
    List {
        /// Path to list below (defaults to the whole store)
        #[arg(value_name = "PATH")]
        path: Option<String>,

        /// Show decrypted values instead of types
        #[arg(short = 'v', long)]
        show_values: bool,

        /// Only parameters whose path contains this text
        #[arg(long)]
        contains: Option<String>,
    },
    /// Delete a parameter
    Delete {
        #[arg(value_name = "NAME")]
        name: String,

        #[arg(long)]
        non_standard: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Errors only when a provider is already installed
    let _ = rustls::crypto::ring::default_provider().install_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ssm=warn,aws_ssm=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ssm = connect(&cli).await?;
    let output = cli.output.as_deref();

    match cli.command {
        Commands::Get {
            name,
            decrypt,
            env,
            non_standard,
        } => {
            let options = GetOptions {
                decrypt,
                non_standard_path: non_standard,
            };
            get::get_command(&ssm, &name, &options, env, output).await
        }
        Commands::Put {
            name,
            value,
            description,
            override_existing,
            encrypt,
            plain,
            key,
            json,
            non_standard,
        } => {
            let options = PutOptions {
                description,
                override_existing,
                encrypt: encrypt_flag(encrypt, plain),
                encryption_key: key,
                non_standard_path: non_standard,
            };
            put::put_command(&ssm, &name, &value, json, &options, output).await
        }
        Commands::List {
            path,
            show_values,
            contains,
        } => {
            let options = ListOptions {
                path,
                contains,
                decrypt: show_values,
            };
            list::list_command(&ssm, options, show_values, output).await
        }
        Commands::Delete { name, non_standard } => {
            let options = DeleteOptions {
                non_standard_path: non_standard,
            };
            delete::delete_command(&ssm, &name, &options).await
        }
    }
}

/// Build the facade from the environment plus command-line overrides
async fn connect(cli: &Cli) -> Result<Ssm> {
    let mut config = SsmConfig::from_env();
    config.cli = true;
    if let Some(profile) = &cli.profile {
        config.profile = Some(profile.clone());
    }
    if let Some(region) = &cli.region {
        config.region = Some(region.clone());
    }

    let options = aws_ssm::ssm::aws_client_options(&config)
        .context("Failed to resolve AWS credentials")?;
    let stage = cli
        .stage
        .clone()
        .map_or(StageSource::Process, |stage| {
            StageSource::Fixed(StageContext::new(stage))
        });

    Ok(Ssm::connect(config, &options).await.with_stage_source(stage))
}

fn encrypt_flag(encrypt: bool, plain: bool) -> Option<bool> {
    match (encrypt, plain) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
