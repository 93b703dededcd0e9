use crate::session::persist;
use crate::session::{SessionEvent, SessionStore};

use models::{Role, SessionIdentity};

use tempfile::TempDir;

fn employer() -> SessionIdentity {
    SessionIdentity {
        user_id: 12,
        role: Role::Employer,
        display_name: String::from("Acme HR"),
    }
}

#[tokio::test]
async fn given_new_store_when_signing_in_then_identity_readable_and_broadcast() {
    let store = SessionStore::new();
    let mut events = store.subscribe();

    store.sign_in(employer()).await.unwrap();

    assert_eq!(store.current().await, Some(employer()));
    assert!(store.is_signed_in().await);
    assert_eq!(events.recv().await.unwrap(), SessionEvent::SignedIn(employer()));
}

/// **VALUE**: Expiry is distinguishable from a normal logout.
///
/// **WHY THIS MATTERS**: `Expired` is the signal to route back to the login
/// screen with "Session expired" while `SignedOut` is user-initiated.
///
/// **BUG THIS CATCHES**: Collapsing both into one event, losing the redirect.
#[tokio::test]
async fn given_signed_in_when_expired_then_cleared_and_expired_event_sent() {
    let store = SessionStore::new();
    store.sign_in(employer()).await.unwrap();
    let mut events = store.subscribe();

    store.expire().await.unwrap();

    assert_eq!(store.current().await, None);
    assert_eq!(events.recv().await.unwrap(), SessionEvent::Expired);
}

#[tokio::test]
async fn given_clones_when_one_signs_out_then_all_see_it() {
    let store = SessionStore::new();
    let other = store.clone();
    store.sign_in(employer()).await.unwrap();

    other.sign_out().await.unwrap();

    assert!(!store.is_signed_in().await);
}

#[tokio::test]
async fn given_persistent_store_when_signed_in_then_restored_by_next_store() {
    let dir = TempDir::new().unwrap();

    let first = SessionStore::with_persistence(dir.path()).unwrap();
    first.sign_in(employer()).await.unwrap();

    let second = SessionStore::with_persistence(dir.path()).unwrap();
    assert_eq!(second.current().await, Some(employer()));
}

#[tokio::test]
async fn given_persistent_store_when_expired_then_file_removed() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::with_persistence(dir.path()).unwrap();
    store.sign_in(employer()).await.unwrap();

    store.expire().await.unwrap();

    assert!(!persist::session_file(dir.path()).exists());
    let restored = SessionStore::with_persistence(dir.path()).unwrap();
    assert_eq!(restored.current().await, None);
}

#[test]
fn given_corrupt_session_file_when_loading_then_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = persist::session_file(dir.path());
    std::fs::write(&path, "[]").unwrap();

    assert!(persist::load(&path).is_err());
}

#[test]
fn given_no_file_when_clearing_then_ok() {
    let dir = TempDir::new().unwrap();

    assert!(persist::clear(&persist::session_file(dir.path())).is_ok());
}
