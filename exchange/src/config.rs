//! Shell configuration loaded via OrthoConfig.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::ValueEnum;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

const DEFAULT_SESSION_DIR: &str = ".exchange-session";
const DEFAULT_LATENCY_MS: u64 = 800;
const DEFAULT_INVESTMENT_LATENCY_MS: u64 = 1500;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Settings controlling where the exchange keeps state and how slow it
/// pretends to be.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXCHANGE")]
pub struct ExchangeSettings {
    /// Directory holding the persisted session.
    pub session_dir: Option<Utf8PathBuf>,
    /// Seed ledger overriding the bundled fixture.
    pub fixture_path: Option<Utf8PathBuf>,
    /// Artificial delay before login and registration complete.
    pub latency_ms: Option<u64>,
    /// Artificial delay before an investment is recorded.
    pub investment_latency_ms: Option<u64>,
    /// Log output format.
    pub log_format: Option<LogFormat>,
}

impl ExchangeSettings {
    /// Session directory, falling back to `.exchange-session`.
    #[must_use]
    pub fn session_dir(&self) -> Utf8PathBuf {
        self.session_dir
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_SESSION_DIR))
    }

    /// Optional fixture override.
    #[must_use]
    pub fn fixture_path(&self) -> Option<&Utf8Path> {
        self.fixture_path.as_deref()
    }

    /// Login and registration delay.
    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms.unwrap_or(DEFAULT_LATENCY_MS))
    }

    /// Investment delay.
    #[must_use]
    pub fn investment_latency(&self) -> Duration {
        Duration::from_millis(
            self.investment_latency_ms
                .unwrap_or(DEFAULT_INVESTMENT_LATENCY_MS),
        )
    }

    /// Log format, text unless configured otherwise.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_default()
    }
}
