use super::*;
use std::sync::Arc;

use serde_json::json;

use crate::state::session::{TOKEN_KEY, USER_KEY};
use crate::util::notify::Recorder;
use crate::util::storage::{MemoryStorage, Storage};

fn logged_in() -> (Arc<MemoryStorage>, SessionStore) {
    let storage = Arc::new(MemoryStorage::with_items([
        (TOKEN_KEY, "abc"),
        (USER_KEY, r#"{"id":1,"name":"Lin"}"#),
    ]));
    let session = SessionStore::load(storage.clone());
    (storage, session)
}

#[test]
fn redirect_clears_session_and_navigates_once() {
    let (storage, session) = logged_in();
    let recorder = Recorder::new();

    redirect_to_login(&session, &recorder, "/login");

    assert_eq!(recorder.paths(), vec!["/login".to_owned()]);
    assert!(!session.is_authenticated());
    assert_eq!(session.profile(), json!({}));
    assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.get_item(USER_KEY).unwrap(), None);
}

#[test]
fn redirect_does_not_notify() {
    let (_storage, session) = logged_in();
    let recorder = Recorder::new();
    redirect_to_login(&session, &recorder, "/login");
    assert!(recorder.messages().is_empty());
}

#[test]
fn should_redirect_unauth_when_token_missing() {
    let session = SessionStore::load(Arc::new(MemoryStorage::new()));
    assert!(should_redirect_unauth(&session));
}

#[test]
fn should_not_redirect_when_token_present() {
    let (_storage, session) = logged_in();
    assert!(!should_redirect_unauth(&session));
}
