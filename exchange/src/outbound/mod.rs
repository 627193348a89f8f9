//! Outbound adapters implementing domain ports.
//!
//! - **session_store**: JSON file persistence for the signed-in user.
//!
//! Adapters translate between domain types and storage formats. They contain
//! no business logic.

pub mod session_store;

pub use session_store::{FileSessionStore, SESSION_FILE};
