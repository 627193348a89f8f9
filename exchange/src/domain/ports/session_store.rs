//! Driven port persisting the authenticated user between runs.

use std::sync::Mutex;

use super::define_port_error;
use crate::domain::User;

define_port_error! {
    /// Errors raised by session persistence adapters.
    pub enum SessionStoreError {
        /// The backing storage could not be read or written.
        Io { message: String } => "session storage failed: {message}",
        /// A stored session could not be decoded.
        Corrupt { message: String } => "stored session is unreadable: {message}",
    }
}

/// Port for saving and restoring the current user.
///
/// Only one user is stored at a time; saving replaces it.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Load the stored user, if any.
    fn load(&self) -> Result<Option<User>, SessionStoreError>;

    /// Replace the stored user.
    fn save(&self, user: &User) -> Result<(), SessionStoreError>;

    /// Forget the stored user. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Process-local store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    user: Mutex<Option<User>>,
}

impl InMemorySessionStore {
    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<User>>, SessionStoreError> {
        self.user
            .lock()
            .map_err(|_| SessionStoreError::io("session lock poisoned"))
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<User>, SessionStoreError> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, user: &User) -> Result<(), SessionStoreError> {
        *self.slot()? = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.slot()? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::test_support::investor;

    #[test]
    fn in_memory_store_round_trips_and_clears() {
        let store = InMemorySessionStore::default();
        assert_eq!(store.load(), Ok(None));

        store.save(&investor()).expect("save");
        assert_eq!(store.load(), Ok(Some(investor())));

        store.clear().expect("clear");
        store.clear().expect("clearing twice");
        assert_eq!(store.load(), Ok(None));
    }

    #[test]
    fn errors_render_their_context() {
        let err = SessionStoreError::corrupt("expected value at line 1");
        assert_eq!(
            err.to_string(),
            "stored session is unreadable: expected value at line 1"
        );
    }
}
