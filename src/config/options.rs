// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};

use serde::Deserialize;
use thiserror::Error;

use super::consts::*;
use super::selectors::Selectors;
use super::targets::Targets;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io { path: PathBuf, #[source] source: io::Error },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub browser: BrowserOptions,
    pub pacing: Pacing,
    pub store: StoreOptions,
    pub targets: Targets,
    pub selectors: Selectors,
}

impl AppOptions {
    /// Parse a TOML document; anything it leaves out keeps its default.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrowserOptions {
    /// WebDriver server endpoint (chromedriver, selenium, …).
    pub webdriver_url: String,
    pub headless: bool,
    pub user_agent: String,
    pub page_load_timeout_ms: u64,
    /// Don't download images; pages render faster.
    pub block_images: bool,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            webdriver_url: s!(DEFAULT_WEBDRIVER_URL),
            headless: false,
            user_agent: s!(USER_AGENT),
            page_load_timeout_ms: PAGE_LOAD_TIMEOUT_MS,
            block_images: true,
        }
    }
}

/// Every fixed wait of a run. All values in milliseconds.
///
/// None of these are needed for correctness; they keep us under rate limits and
/// give lazy pages time to render. Tests use [`Pacing::none`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Pacing {
    pub page_load_ms: u64,
    pub slow_page_load_ms: u64,
    pub consent_settle_ms: u64,
    pub tab_check_ms: u64,
    pub tab_settle_ms: u64,
    pub expand_settle_ms: u64,
    pub scroll_delay_ms: u64,
    pub scroll_settle_ms: u64,
    pub between_targets_ms: u64,
    pub per_record_ms: u64,
    /// Upper bound for condition polls (consent dialog, clickable tab).
    pub wait_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub scroll_attempts_container: u32,
    pub scroll_attempts_window: u32,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            page_load_ms: PAGE_LOAD_PAUSE_MS,
            slow_page_load_ms: SLOW_PAGE_LOAD_PAUSE_MS,
            consent_settle_ms: CONSENT_SETTLE_MS,
            tab_check_ms: TAB_CHECK_PAUSE_MS,
            tab_settle_ms: TAB_SETTLE_MS,
            expand_settle_ms: EXPAND_SETTLE_MS,
            scroll_delay_ms: SCROLL_DELAY_MS,
            scroll_settle_ms: SCROLL_SETTLE_MS,
            between_targets_ms: BETWEEN_TARGETS_MS,
            per_record_ms: PER_RECORD_MS,
            wait_timeout_ms: WAIT_TIMEOUT_MS,
            poll_interval_ms: POLL_INTERVAL_MS,
            scroll_attempts_container: SCROLL_ATTEMPTS_CONTAINER,
            scroll_attempts_window: SCROLL_ATTEMPTS_WINDOW,
        }
    }
}

impl Pacing {
    /// Zero delays, zero poll timeout; attempt budgets unchanged.
    pub fn none() -> Self {
        Self {
            page_load_ms: 0,
            slow_page_load_ms: 0,
            consent_settle_ms: 0,
            tab_check_ms: 0,
            tab_settle_ms: 0,
            expand_settle_ms: 0,
            scroll_delay_ms: 0,
            scroll_settle_ms: 0,
            between_targets_ms: 0,
            per_record_ms: 0,
            wait_timeout_ms: 0,
            poll_interval_ms: 0,
            ..Self::default()
        }
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Sleep for `ms` milliseconds; zero returns immediately.
pub fn pause(ms: u64) {
    if ms > 0 {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    pub path: PathBuf,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_DATASET) }
    }
}
