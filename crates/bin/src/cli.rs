//! CLI argument definitions for the shardusers binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Shardusers account administration
#[derive(Parser, Debug)]
#[command(name = "shardusers")]
#[command(about = "Shardusers: user accounts over sharded JSON files")]
#[command(version)]
pub struct Cli {
    /// Directory holding the shard files
    #[arg(
        short = 'D',
        long,
        global = true,
        default_value = "db",
        env = "SHARDUSERS_DATA_DIR"
    )]
    pub data_dir: PathBuf,

    /// Output format
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Human,
        env = "SHARDUSERS_FORMAT"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a user
    Create(CredentialArgs),
    /// Check a user's password
    Verify(CredentialArgs),
    /// Change a user's password
    Passwd(PasswdArgs),
    /// Delete a user
    Delete(CredentialArgs),
    /// Show a user by uid or email, without a password
    Lookup(LookupArgs),
    /// List all users
    List,
    /// Show user and shard counts
    Stats,
}

/// Email and password of an existing or new user
#[derive(clap::Args, Debug)]
pub struct CredentialArgs {
    /// Email address (normalized before use)
    #[arg(short, long)]
    pub email: String,

    /// Password
    #[arg(short, long, env = "SHARDUSERS_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for the passwd command
#[derive(clap::Args, Debug)]
pub struct PasswdArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,

    /// Replacement password
    #[arg(long, env = "SHARDUSERS_NEW_PASSWORD", hide_env_values = true)]
    pub new_password: String,
}

/// Arguments for the lookup command
#[derive(clap::Args, Debug)]
pub struct LookupArgs {
    /// User id
    #[arg(long, conflicts_with = "email", required_unless_present = "email")]
    pub uid: Option<String>,

    /// Email address
    #[arg(short, long)]
    pub email: Option<String>,
}
