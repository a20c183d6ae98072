// src/browser/mod.rs
//! Browser automation seam.
//!
//! Everything that touches a live page goes through [`Driver`]: the WebDriver
//! client implements it for real runs, tests implement it over an in-memory
//! page. The [`Session`] manager and the page specs only ever see `&dyn Driver`.
//!
//! Calls are blocking; one page, one call at a time.

pub mod session;
pub mod webdriver;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub use session::{ScrollOutcome, ScrollScope, Session};
pub use webdriver::WebDriver;

/// How to find an element. Deserializes from `{ css = "…" }` or `{ xpath = "…" }`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(s: &str) -> Self { Locator::Css(s!(s)) }
    pub fn xpath(s: &str) -> Self { Locator::XPath(s!(s)) }

    /// W3C locator strategy name.
    pub fn strategy(&self) -> &'static str {
        match self {
            Locator::Css(_) => "css selector",
            Locator::XPath(_) => "xpath",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Locator::Css(v) | Locator::XPath(v) => v,
        }
    }
}

/// Opaque handle to an element on the current page.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementRef(pub String);

/// What to scroll: one element, or the whole document.
#[derive(Clone, Copy, Debug)]
pub enum ScrollTarget<'a> {
    Element(&'a ElementRef),
    Window,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("webdriver transport: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no such element: {0}")]
    NoSuchElement(String),

    #[error("stale element reference")]
    StaleElement,

    #[error("browser session is gone")]
    InvalidSession,

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("webdriver error {error}: {message}")]
    WebDriver { error: String, message: String },

    #[error("unexpected webdriver response: {0}")]
    UnexpectedResponse(String),
}

impl DriverError {
    /// The browser (or the driver process) is no longer usable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DriverError::InvalidSession)
            || matches!(self, DriverError::Http(e) if e.is_connect())
    }
}

/// Page operations the collector needs. All element lookups are scoped either
/// to the document or to a parent element; `*_in` variants take the parent.
pub trait Driver {
    fn goto(&self, url: &str) -> Result<(), DriverError>;

    fn find_all(&self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError>;

    fn find_all_in(&self, parent: &ElementRef, locator: &Locator) -> Result<Vec<ElementRef>, DriverError>;

    fn text(&self, element: &ElementRef) -> Result<String, DriverError>;

    /// `Ok(None)` when the attribute is absent.
    fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>, DriverError>;

    /// Displayed and enabled.
    fn is_clickable(&self, element: &ElementRef) -> Result<bool, DriverError>;

    fn click(&self, element: &ElementRef) -> Result<(), DriverError>;

    /// Click through `element.click()` in page script; works on elements
    /// covered by overlays where a native click would be intercepted.
    fn script_click(&self, element: &ElementRef) -> Result<(), DriverError>;

    fn scroll_height(&self, target: ScrollTarget<'_>) -> Result<i64, DriverError>;

    fn scroll_to_bottom(&self, target: ScrollTarget<'_>) -> Result<(), DriverError>;

    /// Run a synchronous script; returns its JSON result.
    fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value, DriverError>;

    fn quit(&self) -> Result<(), DriverError>;

    fn find(&self, locator: &Locator) -> Result<ElementRef, DriverError> {
        self.find_all(locator)?
            .into_iter()
            .next()
            .ok_or_else(|| DriverError::NoSuchElement(s!(locator.value())))
    }

    fn find_in(&self, parent: &ElementRef, locator: &Locator) -> Result<ElementRef, DriverError> {
        self.find_all_in(parent, locator)?
            .into_iter()
            .next()
            .ok_or_else(|| DriverError::NoSuchElement(s!(locator.value())))
    }
}
