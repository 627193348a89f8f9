//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod session_store;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    DEFAULT_PROFILE_IMAGE, DemoAccount, FixtureLoginService, LoginService, password_digest,
};
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{InMemorySessionStore, SessionStore, SessionStoreError};
