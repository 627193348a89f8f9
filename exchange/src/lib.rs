//! Patent exchange library: ledger store, role statistics, and the session
//! shell behind the `exchange` binary.

pub mod app;
pub mod config;
pub mod domain;
pub mod outbound;
pub mod seed;

pub use app::{ExchangeApp, TransactionRow};
pub use config::{ExchangeSettings, LogFormat};
