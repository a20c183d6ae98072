// src/config/consts.rs

// Local store
pub const DEBUG_LOG_FILE: &str = ".store/debug.log";
pub const DEFAULT_LOG_FILTER: &str = "info";

// Dataset
pub const DEFAULT_DATASET: &str = "data/raw/all_california_gym_reviews.csv";
pub const DATASET_SEP: char = ',';
pub const DATASET_HEADERS: [&str; 7] = ["id", "name", "source", "location", "date", "rating", "comment"];
pub const ID_MAX_LEN: usize = 100;

// Sentinels
pub const ANONYMOUS: &str = "Anonymous";
pub const NO_DATE: &str = "N/A";
pub const DATE_FORMAT: &str = "%d-%m-%Y";

// Browser
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const PAGE_LOAD_TIMEOUT_MS: u64 = 30_000;

// Pacing (be polite)
pub const PAGE_LOAD_PAUSE_MS: u64 = 3_000;
pub const SLOW_PAGE_LOAD_PAUSE_MS: u64 = 5_000;
pub const CONSENT_SETTLE_MS: u64 = 1_000;
pub const TAB_CHECK_PAUSE_MS: u64 = 2_000;
pub const TAB_SETTLE_MS: u64 = 3_000;
pub const EXPAND_SETTLE_MS: u64 = 200;
pub const SCROLL_DELAY_MS: u64 = 1_500;
pub const SCROLL_SETTLE_MS: u64 = 2_000;
pub const BETWEEN_TARGETS_MS: u64 = 2_000;
pub const PER_RECORD_MS: u64 = 50;
pub const WAIT_TIMEOUT_MS: u64 = 15_000;
pub const POLL_INTERVAL_MS: u64 = 250;

// Scroll budgets
pub const SCROLL_ATTEMPTS_CONTAINER: u32 = 8;
pub const SCROLL_ATTEMPTS_WINDOW: u32 = 6;
