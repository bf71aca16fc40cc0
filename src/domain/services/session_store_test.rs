use super::SessionStore;
use crate::domain::models::Session;

fn session() -> Session {
    return Session {
        user_id: 7,
        email: "m@example.com".to_string(),
        token: "abc".to_string(),
    };
}

#[test]
fn it_starts_logged_out() {
    let store = SessionStore::default();
    assert!(!store.is_authenticated());
    assert_eq!(store.user_id(), 0);
}

#[test]
fn it_holds_a_session() {
    let mut store = SessionStore::default();
    store.set(session());

    assert!(store.is_authenticated());
    assert_eq!(store.user_id(), 7);
    assert_eq!(store.session().unwrap().email, "m@example.com");
}

#[test]
fn it_clears_the_session() {
    let mut store = SessionStore::new(Some(session()));
    store.clear();

    assert!(!store.is_authenticated());
    assert!(store.session().is_none());
}
