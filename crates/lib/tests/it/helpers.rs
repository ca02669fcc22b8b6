//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::Path;

use shardusers::{User, UserDirectory};
use tempfile::TempDir;

/// Create an empty directory backed by a fresh temp dir.
///
/// The TempDir must be kept alive for as long as the directory is used.
pub async fn setup_directory() -> (TempDir, UserDirectory) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let directory = UserDirectory::open(tmp.path())
        .await
        .expect("Failed to open directory");
    (tmp, directory)
}

/// Create a directory with one user already registered.
pub async fn setup_directory_with_user(
    email: &str,
    password: &str,
) -> (TempDir, UserDirectory, User) {
    let (tmp, directory) = setup_directory().await;
    let user = directory
        .create(email, password)
        .await
        .expect("Failed to create user");
    (tmp, directory, user)
}

/// Open a new directory over existing shard files, as a restart would.
pub async fn reopen(dir: &Path) -> UserDirectory {
    UserDirectory::open(dir)
        .await
        .expect("Failed to reopen directory")
}

/// Parse the shard file a uid belongs to. A missing shard reads as empty.
pub fn shard_records(dir: &Path, uid: &str) -> Vec<serde_json::Value> {
    let path = dir.join(&uid[..2]);
    match std::fs::read_to_string(&path) {
        Ok(raw) => serde_json::from_str(&raw).expect("Shard should be a JSON array"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => panic!("Failed to read {}: {e}", path.display()),
    }
}

/// Whether the shard file for `uid` holds a record with that uid.
pub fn shard_contains(dir: &Path, uid: &str) -> bool {
    shard_records(dir, uid)
        .iter()
        .any(|record| record["uid"] == uid)
}

/// Make every write to the shard of `uid` fail by occupying its scratch path.
pub fn block_shard_writes(dir: &Path, uid: &str) {
    std::fs::create_dir(dir.join(format!("{}.tmp", &uid[..2])))
        .expect("Failed to block shard");
}

/// Make every shard write fail, whatever uid is generated.
pub fn block_all_shard_writes(dir: &Path) {
    const HEX: &[u8] = b"0123456789abcdef";
    for hi in HEX {
        for lo in HEX {
            let name = format!("{}{}.tmp", *hi as char, *lo as char);
            std::fs::create_dir(dir.join(name)).expect("Failed to block shard");
        }
    }
}

/// Undo [`block_shard_writes`].
pub fn unblock_shard_writes(dir: &Path, uid: &str) {
    std::fs::remove_dir(dir.join(format!("{}.tmp", &uid[..2])))
        .expect("Failed to unblock shard");
}
