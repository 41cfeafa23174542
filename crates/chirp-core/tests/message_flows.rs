use std::sync::Arc;

use chirp_core::{AccountService, MessageService, ServiceError};
use chirp_db::Database;

fn services() -> (AccountService, MessageService) {
    let db = Arc::new(Database::open_in_memory().unwrap());
    (
        AccountService::new(db.clone()),
        MessageService::new(db),
    )
}

#[test]
fn create_persists_and_returns_stored_entity() {
    let (accounts, messages) = services();
    let alice = accounts.register("alice", "pass1").unwrap();

    let message = messages.create(alice.id, "hi", Some(1_700_000_000)).unwrap();
    assert_eq!(message.id, 1);
    assert_eq!(message.posted_by, alice.id);
    assert_eq!(message.text, "hi");
    assert_eq!(message.posted_at, 1_700_000_000);

    let fetched = messages.get_by_id(message.id).unwrap().unwrap();
    assert_eq!(fetched, message);
}

#[test]
fn create_stamps_posted_at_when_omitted() {
    let (accounts, messages) = services();
    let alice = accounts.register("alice", "pass1").unwrap();

    let before = chrono::Utc::now().timestamp();
    let message = messages.create(alice.id, "hi", None).unwrap();
    let after = chrono::Utc::now().timestamp();

    assert!(message.posted_at >= before && message.posted_at <= after);
}

#[test]
fn create_enforces_text_boundaries() {
    let (accounts, messages) = services();
    let alice = accounts.register("alice", "pass1").unwrap();

    let err = messages.create(alice.id, "", None).unwrap_err();
    assert!(matches!(err, ServiceError::EmptyText));

    let over = "x".repeat(256);
    let err = messages.create(alice.id, &over, None).unwrap_err();
    assert!(matches!(err, ServiceError::TextTooLong));

    let exact = "x".repeat(255);
    let message = messages.create(alice.id, &exact, None).unwrap();
    assert_eq!(message.text.len(), 255);
}

#[test]
fn text_limit_counts_characters_not_bytes() {
    let (accounts, messages) = services();
    let alice = accounts.register("alice", "pass1").unwrap();

    // 255 two-byte characters exceed 255 bytes but stay within the limit.
    let text = "é".repeat(255);
    assert!(messages.create(alice.id, &text, None).is_ok());

    let err = messages.create(alice.id, &"é".repeat(256), None).unwrap_err();
    assert!(matches!(err, ServiceError::TextTooLong));
}

#[test]
fn create_rejects_unknown_account() {
    let (_accounts, messages) = services();

    let err = messages.create(42, "hi", None).unwrap_err();
    assert!(matches!(err, ServiceError::UnknownAccount(42)));
    assert!(messages.list_all().unwrap().is_empty());
}

#[test]
fn get_by_id_returns_none_for_missing_message() {
    let (_accounts, messages) = services();
    assert!(messages.get_by_id(1).unwrap().is_none());
}

#[test]
fn list_all_returns_every_message_and_empty_when_none() {
    let (accounts, messages) = services();
    assert!(messages.list_all().unwrap().is_empty());

    let alice = accounts.register("alice", "pass1").unwrap();
    let bob = accounts.register("bob", "pass2").unwrap();
    messages.create(alice.id, "one", Some(1)).unwrap();
    messages.create(bob.id, "two", Some(2)).unwrap();

    let all = messages.list_all().unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn list_by_account_scopes_to_owner_and_tolerates_unknown_ids() {
    let (accounts, messages) = services();
    let alice = accounts.register("alice", "pass1").unwrap();
    let bob = accounts.register("bob", "pass2").unwrap();

    messages.create(alice.id, "one", Some(1)).unwrap();
    messages.create(bob.id, "two", Some(2)).unwrap();
    messages.create(alice.id, "three", Some(3)).unwrap();

    let hers = messages.list_by_account(alice.id).unwrap();
    assert_eq!(hers.len(), 2);
    assert!(hers.iter().all(|m| m.posted_by == alice.id));

    // Account with no messages, and account that does not exist at all:
    // both are empty lists, not rejections.
    let carol = accounts.register("carol", "pass3").unwrap();
    assert!(messages.list_by_account(carol.id).unwrap().is_empty());
    assert!(messages.list_by_account(999).unwrap().is_empty());
}

#[test]
fn update_changes_text_and_nothing_else() {
    let (accounts, messages) = services();
    let alice = accounts.register("alice", "pass1").unwrap();
    let original = messages.create(alice.id, "hi", Some(1_700_000_000)).unwrap();

    let updated = messages.update(original.id, "hi there").unwrap();
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.posted_by, original.posted_by);
    assert_eq!(updated.posted_at, original.posted_at);
    assert_eq!(updated.text, "hi there");

    let fetched = messages.get_by_id(original.id).unwrap().unwrap();
    assert_eq!(fetched, updated);
}

#[test]
fn update_validates_text_before_touching_the_store() {
    let (accounts, messages) = services();
    let alice = accounts.register("alice", "pass1").unwrap();
    let message = messages.create(alice.id, "hi", None).unwrap();

    let err = messages.update(message.id, "").unwrap_err();
    assert!(matches!(err, ServiceError::EmptyText));
    let err = messages.update(message.id, &"x".repeat(256)).unwrap_err();
    assert!(matches!(err, ServiceError::TextTooLong));

    // Original text untouched by the rejected updates.
    assert_eq!(messages.get_by_id(message.id).unwrap().unwrap().text, "hi");
}

#[test]
fn update_rejects_missing_message() {
    let (_accounts, messages) = services();

    let err = messages.update(7, "hello").unwrap_err();
    assert!(matches!(err, ServiceError::UnknownMessage(7)));
}

#[test]
fn delete_is_idempotent() {
    let (accounts, messages) = services();
    let alice = accounts.register("alice", "pass1").unwrap();
    let message = messages.create(alice.id, "hi", Some(5)).unwrap();
    let id = message.id;

    let first = messages.delete(id).unwrap();
    assert_eq!(first, Some(message));

    let second = messages.delete(id).unwrap();
    assert!(second.is_none());
}

#[test]
fn end_to_end_register_post_update_delete() {
    let (accounts, messages) = services();

    let alice = accounts.register("alice", "pass1").unwrap();
    assert_eq!(alice.id, 1);

    let err = accounts.register("alice", "pass2").unwrap_err();
    assert!(err.is_rejection());

    let message = messages.create(1, "hi", Some(1_700_000_000)).unwrap();
    assert_eq!(message.id, 1);
    assert_eq!(message.posted_by, 1);
    assert_eq!(message.text, "hi");
    assert_eq!(message.posted_at, 1_700_000_000);

    let updated = messages.update(1, "hi there").unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.text, "hi there");

    let deleted = messages.delete(1).unwrap().unwrap();
    assert_eq!(deleted.id, 1);
    assert_eq!(deleted.text, "hi there");

    assert!(messages.delete(1).unwrap().is_none());
}
