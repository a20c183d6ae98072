// src/config/mod.rs

pub mod consts;
pub mod options;
pub mod selectors;
pub mod targets;

pub use options::{AppOptions, BrowserOptions, ConfigError, Pacing, StoreOptions};
pub use selectors::Selectors;
pub use targets::{MapsLocation, SiteTarget, Target, Targets};
