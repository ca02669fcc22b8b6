//! Account lifecycle tests: create, read, update, delete
//!
//! Tests the fundamental account workflows including:
//! - Creating users and rejecting duplicate emails
//! - Reading with normalized emails and correct/incorrect passwords
//! - Updating with and without a password change
//! - Deleting from both indexes

use shardusers::{UserUpdate, user::UserError};

use crate::helpers::*;

// ===== CREATE =====

#[tokio::test]
async fn test_create_user() {
    let (_tmp, directory) = setup_directory().await;

    let user = directory
        .create("alice@x.com", "secret1")
        .await
        .expect("Failed to create user");

    assert_eq!(user.email(), "alice@x.com");
    assert!(uuid::Uuid::parse_str(user.uid()).is_ok());
    assert!(!user.salt().is_empty());
    assert!(!user.password_hash().is_empty());
    assert_eq!(directory.len().await, 1);
}

#[tokio::test]
async fn test_create_duplicate_email_fails() {
    let (_tmp, directory, _) = setup_directory_with_user("alice@x.com", "first").await;

    let err = directory
        .create("alice@x.com", "second")
        .await
        .expect_err("Duplicate email should fail");
    assert!(err.is_conflict());
    assert!(matches!(
        err,
        shardusers::Error::User(UserError::DuplicateUser { ref email }) if email == "alice@x.com"
    ));
    assert_eq!(directory.len().await, 1);
}

#[tokio::test]
async fn test_create_duplicate_after_normalization_fails() {
    let (_tmp, directory, _) = setup_directory_with_user("alice@x.com", "first").await;

    let result = directory.create("  ALICE@x.COM ", "second").await;
    assert!(result.unwrap_err().is_conflict());
}

#[tokio::test]
async fn test_create_multiple_users() {
    let (_tmp, directory) = setup_directory().await;

    let a = directory.create("a@x.com", "pw-a").await.unwrap();
    let b = directory.create("b@x.com", "pw-b").await.unwrap();
    let c = directory.create("c@x.com", "pw-c").await.unwrap();

    assert_ne!(a.uid(), b.uid());
    assert_ne!(a.salt(), b.salt());
    assert_eq!(directory.len().await, 3);

    let emails: Vec<_> = directory
        .users()
        .await
        .iter()
        .map(|u| u.email().to_string())
        .collect();
    assert_eq!(emails, vec!["a@x.com", "b@x.com", "c@x.com"]);
    assert_eq!(directory.read("c@x.com", "pw-c").await.unwrap(), c);
}

// ===== READ =====

#[tokio::test]
async fn test_read_normalizes_email() {
    let (_tmp, directory, created) = setup_directory_with_user("a@b.com", "pw").await;

    let padded = directory.read(" A@B.com ", "pw").await.unwrap();
    let plain = directory.read("a@b.com", "pw").await.unwrap();
    assert_eq!(padded, plain);
    assert_eq!(plain, created);

    let bom = directory.read("\u{feff}a@b.com", "pw").await.unwrap();
    assert_eq!(bom, created);
    assert!(directory.create("\u{feff}A@B.com", "pw").await.unwrap_err().is_conflict());
}

#[tokio::test]
async fn test_read_unknown_user() {
    let (_tmp, directory) = setup_directory().await;

    let err = directory.read("ghost@x.com", "pw").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        err,
        shardusers::Error::User(UserError::UnknownUser { .. })
    ));
}

#[tokio::test]
async fn test_read_wrong_password() {
    let (_tmp, directory, _) = setup_directory_with_user("a@x.com", "correct").await;

    let err = directory.read("a@x.com", "wrong").await.unwrap_err();
    assert!(err.is_authentication_error());
    assert!(matches!(
        err,
        shardusers::Error::User(UserError::InvalidCredentials)
    ));
}

// ===== UPDATE =====

#[tokio::test]
async fn test_update_without_password_keeps_hash() {
    let (tmp, directory, created) = setup_directory_with_user("a@x.com", "pw").await;

    let updated = directory
        .update("a@x.com", "pw", UserUpdate::new())
        .await
        .unwrap();
    assert_eq!(updated.password_hash(), created.password_hash());

    let empty = directory
        .update("a@x.com", "pw", UserUpdate::with_password(""))
        .await
        .unwrap();
    assert_eq!(empty.password_hash(), created.password_hash());

    let records = shard_records(tmp.path(), created.uid());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["pwd"], created.password_hash());
}

#[tokio::test]
async fn test_update_rehashes_password() {
    let (_tmp, directory, created) = setup_directory_with_user("a@x.com", "p1").await;

    directory
        .update("a@x.com", "p1", UserUpdate::with_password("p2"))
        .await
        .unwrap();

    let user = directory.read("a@x.com", "p2").await.unwrap();
    assert_eq!(user.uid(), created.uid());
    assert_eq!(user.salt(), created.salt());

    let err = directory.read("a@x.com", "p1").await.unwrap_err();
    assert!(err.is_authentication_error());
}

#[tokio::test]
async fn test_update_requires_credentials() {
    let (_tmp, directory, _) = setup_directory_with_user("a@x.com", "pw").await;

    let err = directory
        .update("a@x.com", "wrong", UserUpdate::with_password("new"))
        .await
        .unwrap_err();
    assert!(err.is_authentication_error());

    let err = directory
        .update("nobody@x.com", "pw", UserUpdate::new())
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    directory.read("a@x.com", "pw").await.unwrap();
}

// ===== DELETE =====

#[tokio::test]
async fn test_delete_removes_from_indexes_and_disk() {
    let (tmp, directory, created) = setup_directory_with_user("a@x.com", "pw").await;
    assert!(shard_contains(tmp.path(), created.uid()));

    directory.delete("a@x.com", "pw").await.unwrap();

    assert!(directory.read("a@x.com", "pw").await.unwrap_err().is_not_found());
    assert!(directory.lookup_by_uid(created.uid()).await.is_none());
    assert!(directory.lookup_by_email("a@x.com").await.is_none());
    assert!(directory.is_empty().await);
    assert!(!shard_contains(tmp.path(), created.uid()));
}

#[tokio::test]
async fn test_delete_requires_credentials() {
    let (tmp, directory, created) = setup_directory_with_user("a@x.com", "pw").await;

    assert!(
        directory
            .delete("a@x.com", "wrong")
            .await
            .unwrap_err()
            .is_authentication_error()
    );
    assert!(
        directory
            .delete("other@x.com", "pw")
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert!(shard_contains(tmp.path(), created.uid()));
}

#[tokio::test]
async fn test_email_reusable_after_delete() {
    let (_tmp, directory, first) = setup_directory_with_user("a@x.com", "pw").await;
    directory.delete("a@x.com", "pw").await.unwrap();

    let second = directory.create("a@x.com", "other").await.unwrap();
    assert_ne!(first.uid(), second.uid());
    directory.read("a@x.com", "other").await.unwrap();
}

// ===== SCENARIO =====

#[tokio::test]
async fn test_alice_scenario() {
    let (_tmp, directory) = setup_directory().await;

    let alice = directory.create("alice@x.com", "secret1").await.unwrap();
    assert!(!alice.salt().is_empty());
    assert!(!alice.password_hash().is_empty());

    let read = directory.read("ALICE@X.com", "secret1").await.unwrap();
    assert_eq!(read, alice);

    let err = directory.read("alice@x.com", "wrong").await.unwrap_err();
    assert!(err.is_authentication_error());

    directory.delete("alice@x.com", "secret1").await.unwrap();

    let err = directory.read("alice@x.com", "secret1").await.unwrap_err();
    assert!(err.is_not_found());
}
