//! Database integration tests
//!
//! These tests verify the DbClient functionality using in-memory SQLite.

use trove::db::DbClient;
use trove::types::AppError;

/// Test helper to create a DbClient with in-memory database
async fn create_test_client() -> DbClient {
    DbClient::new_memory()
        .await
        .expect("Failed to create in-memory database")
}

#[tokio::test]
async fn test_create_memory_client() {
    let client = create_test_client().await;
    // If we get here without error, the client was created successfully
    // and the schema was initialized
    assert!(client.connection().is_ok());
}

#[tokio::test]
async fn test_create_local_client() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("trove-test.db");

    let client = DbClient::new_local(path.to_str().unwrap())
        .await
        .expect("Failed to create local database");

    assert!(client.connection().is_ok());
}

#[tokio::test]
async fn test_insert_user_assigns_ids() {
    let client = create_test_client().await;

    let first = client
        .insert_user("ab", "A B", None, "$argon2id$fake-hash-a")
        .await
        .expect("should insert");
    let second = client
        .insert_user("cd", "C D", Some("cee"), "$argon2id$fake-hash-b")
        .await
        .expect("should insert");

    assert!(first.id >= 1);
    assert_eq!(second.id, first.id + 1);
    assert!(first.date_created > 0);
}

#[tokio::test]
async fn test_duplicate_user_name_is_taken() {
    let client = create_test_client().await;

    client
        .insert_user("ab", "A B", None, "$argon2id$fake-hash-a")
        .await
        .expect("First user creation should succeed");

    let result = client
        .insert_user("ab", "Other Person", None, "$argon2id$fake-hash-b")
        .await;

    assert!(matches!(result, Err(AppError::UsernameTaken)));

    // The original row is untouched.
    let stored = client.user_by_name("ab").await.unwrap().unwrap();
    assert_eq!(stored.full_name, "A B");
}

#[tokio::test]
async fn test_user_round_trip() {
    let client = create_test_client().await;

    let inserted = client
        .insert_user("ab", "A B", None, "$argon2id$fake-hash")
        .await
        .expect("should insert");

    let by_name = client
        .user_by_name("ab")
        .await
        .expect("should query")
        .expect("should exist");
    assert_eq!(by_name.id, inserted.id);
    assert_eq!(by_name.full_name, "A B");
    assert_eq!(by_name.nickname, None, "absent nickname stays NULL");
    assert_eq!(by_name.password_hash, "$argon2id$fake-hash");

    let by_id = client
        .user_by_id(inserted.id)
        .await
        .expect("should query")
        .expect("should exist");
    assert_eq!(by_id.user_name, "ab");

    assert!(client.user_by_name("nobody").await.unwrap().is_none());
    assert!(client.user_by_id(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_nickname_round_trip() {
    let client = create_test_client().await;

    client
        .insert_user("cd", "C D", Some("cee"), "$argon2id$fake-hash")
        .await
        .expect("should insert");

    let stored = client.user_by_name("cd").await.unwrap().unwrap();
    assert_eq!(stored.nickname.as_deref(), Some("cee"));
}

#[tokio::test]
async fn test_things_round_trip() {
    let client = create_test_client().await;

    let first = client
        .insert_thing("Thing One", "The first thing", None)
        .await
        .expect("should insert");
    let second = client
        .insert_thing("Thing Two", "The second thing", Some("http://example.com/2.png"))
        .await
        .expect("should insert");

    let all = client.list_things().await.expect("should list");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first.id);
    assert_eq!(all[1].id, second.id);
    assert_eq!(all[0].image, None);
    assert_eq!(all[1].image.as_deref(), Some("http://example.com/2.png"));

    let fetched = client
        .thing_by_id(second.id)
        .await
        .expect("should query")
        .expect("should exist");
    assert_eq!(fetched.title, "Thing Two");

    assert!(client.thing_by_id(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_reviews_are_scoped_to_their_thing() {
    let client = create_test_client().await;

    let user = client
        .insert_user("ab", "A B", None, "$argon2id$fake-hash")
        .await
        .expect("should insert user");
    let thing_one = client
        .insert_thing("Thing One", "The first thing", None)
        .await
        .expect("should insert thing");
    let thing_two = client
        .insert_thing("Thing Two", "The second thing", None)
        .await
        .expect("should insert thing");

    client
        .insert_review(5, "great", thing_one.id, user.id)
        .await
        .expect("should insert review");
    client
        .insert_review(2, "meh", thing_one.id, user.id)
        .await
        .expect("should insert review");
    client
        .insert_review(4, "fine", thing_two.id, user.id)
        .await
        .expect("should insert review");

    let for_one = client
        .reviews_for_thing(thing_one.id)
        .await
        .expect("should query");
    assert_eq!(for_one.len(), 2);
    assert_eq!(for_one[0].text, "great");
    assert_eq!(for_one[1].text, "meh");
    assert!(for_one.iter().all(|r| r.thing_id == thing_one.id));

    let for_two = client
        .reviews_for_thing(thing_two.id)
        .await
        .expect("should query");
    assert_eq!(for_two.len(), 1);
    assert_eq!(for_two[0].rating, 4);
}
