//! Read-only commands: lookup, list, stats.

use std::path::Path;

use shardusers::shard::shard_key;

use super::{CommandResult, open_directory};
use crate::{
    cli::LookupArgs,
    output::{OutputFormat, print_table, print_user, user_json},
};

/// Run the `lookup` command
pub async fn lookup(data_dir: &Path, args: &LookupArgs, format: OutputFormat) -> CommandResult {
    let directory = open_directory(data_dir).await?;
    let user = match (&args.uid, &args.email) {
        (Some(uid), _) => directory.lookup_by_uid(uid).await,
        (None, Some(email)) => directory.lookup_by_email(email).await,
        (None, None) => return Err("either --uid or --email is required".into()),
    };

    match user {
        Some(user) => {
            print_user(&user, format)?;
            Ok(())
        }
        None => Err("no such user".into()),
    }
}

/// Run the `list` command
pub async fn list(data_dir: &Path, format: OutputFormat) -> CommandResult {
    let directory = open_directory(data_dir).await?;
    let users = directory.users().await;

    match format {
        OutputFormat::Human => {
            if users.is_empty() {
                println!("No users");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = users
                .iter()
                .map(|u| {
                    vec![
                        u.email().to_string(),
                        u.uid().to_string(),
                        shard_key(u.uid()).unwrap_or("?").to_string(),
                    ]
                })
                .collect();
            print_table(&["EMAIL", "UID", "SHARD"], &rows);
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = users.iter().map(user_json).collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

/// Run the `stats` command
pub async fn stats(data_dir: &Path, format: OutputFormat) -> CommandResult {
    let directory = open_directory(data_dir).await?;
    let users = directory.len().await;
    let shards = directory.shard_names().await;

    match format {
        OutputFormat::Human => {
            println!("Data dir:  {}", data_dir.display());
            println!("Users:     {users}");
            println!("Shards:    {}", shards.len());
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "data_dir": data_dir.display().to_string(),
                "users": users,
                "shards": shards,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}
