#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use crate::domain::models::Session;

/// Owns the authenticated-user record for the lifetime of the app. Created
/// once at startup from the session probe and passed down through the UI
/// loop; there is deliberately no global handle to it.
#[derive(Default)]
pub struct SessionStore {
    session: Option<Session>,
}

impl SessionStore {
    pub fn new(session: Option<Session>) -> SessionStore {
        return SessionStore { session };
    }

    pub fn session(&self) -> Option<&Session> {
        return self.session.as_ref();
    }

    pub fn is_authenticated(&self) -> bool {
        return self.session.is_some();
    }

    pub fn user_id(&self) -> i64 {
        return self.session.as_ref().map(|s| return s.user_id).unwrap_or(0);
    }

    pub fn set(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn clear(&mut self) {
        self.session = None;
    }
}
