//! Account commands: create, verify, passwd, delete.

use std::path::Path;

use shardusers::{UserUpdate, user::normalize_email};

use super::{CommandResult, open_directory};
use crate::{
    cli::{CredentialArgs, PasswdArgs},
    output::{OutputFormat, print_user},
};

/// Run the `create` command
pub async fn create(data_dir: &Path, args: &CredentialArgs, format: OutputFormat) -> CommandResult {
    let directory = open_directory(data_dir).await?;
    let user = directory.create(&args.email, &args.password).await?;
    print_user(&user, format)?;
    Ok(())
}

/// Run the `verify` command
pub async fn verify(data_dir: &Path, args: &CredentialArgs, format: OutputFormat) -> CommandResult {
    let directory = open_directory(data_dir).await?;
    let user = directory.read(&args.email, &args.password).await?;
    print_user(&user, format)?;
    Ok(())
}

/// Run the `passwd` command
pub async fn passwd(data_dir: &Path, args: &PasswdArgs, format: OutputFormat) -> CommandResult {
    if args.new_password.is_empty() {
        return Err("new password must not be empty".into());
    }

    let directory = open_directory(data_dir).await?;
    let user = directory
        .update(
            &args.credentials.email,
            &args.credentials.password,
            UserUpdate::with_password(args.new_password.as_str()),
        )
        .await?;
    print_user(&user, format)?;
    Ok(())
}

/// Run the `delete` command
pub async fn delete(data_dir: &Path, args: &CredentialArgs, format: OutputFormat) -> CommandResult {
    let directory = open_directory(data_dir).await?;
    let existing = directory.lookup_by_email(&args.email).await;
    directory.delete(&args.email, &args.password).await?;

    let email = normalize_email(&args.email);
    let uid = existing.as_ref().map(|user| user.uid());
    match format {
        OutputFormat::Human => println!("Deleted {email}"),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "deleted": uid, "email": email })
        ),
    }
    Ok(())
}
