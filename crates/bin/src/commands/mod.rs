pub mod account;
pub mod inspect;

use std::path::Path;

use shardusers::UserDirectory;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

async fn open_directory(data_dir: &Path) -> Result<UserDirectory, Box<dyn std::error::Error>> {
    let directory = UserDirectory::open(data_dir).await?;
    Ok(directory)
}
