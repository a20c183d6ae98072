// src/specs/mod.rs
//! # Page “specs”: one extractor per review source
//!
//! Each spec knows *where the data lives* on one site's review page and how to
//! read it off a live session. Nothing here opens browsers, decides what to
//! scrape, or formats output; that's `browser::Session` and `runner`.
//!
//! ## Contract
//! - [`Extractor::locate`] lists the review elements on the current page.
//! - [`Extractor::read`] reads one element into a [`RawReview`]. Every field is
//!   read on its own into a [`Field`]; one missing span never costs the others.
//! - [`Extractor::extract_all`] (provided) turns raw reads into [`Review`]s:
//!   failed fields become sentinels through [`or_sentinel`], the id comes from
//!   `core::identity`, and the store decides new vs duplicate.
//!
//! ## Counting
//! Every located element yields a record, so `successful == found` on a normal
//! page, including elements where nothing could be read (all sentinels). The
//! only way to get `failed > 0` is losing the browser session mid-page: the
//! page is abandoned and what's left is counted as failed.
//!
//! ## Current specs
//! - `google_maps`: place page, reviews pane, lazy-loaded by scrolling.
//! - `top_rated`: top-rated.online place page (mirrors Google reviews).
//! - `expat`: expat.com forum thread; posts have no rating.
//! - `trustburn`: trustburn.com company page; star fill widths.

pub mod expat;
pub mod google_maps;
pub mod top_rated;
pub mod trustburn;

use std::ops::AddAssign;

use chrono::NaiveDate;
use thiserror::Error;

use crate::browser::{DriverError, ElementRef, Locator, Session};
use crate::config::consts::{ANONYMOUS, NO_DATE};
use crate::config::{Pacing, Selectors};
use crate::config::options::pause;
use crate::core::{date, identity};
use crate::review::{Review, Source};
use crate::store::ReviewStore;

pub use expat::ExpatForum;
pub use google_maps::GoogleMaps;
pub use top_rated::TopRated;
pub use trustburn::Trustburn;

/* ---------------- Field reads ---------------- */

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("not on the page")]
    Missing,

    #[error("present but empty")]
    Empty,

    #[error("unparseable: {0:?}")]
    Unparseable(String),

    #[error(transparent)]
    Driver(DriverError),
}

impl From<DriverError> for FieldError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::NoSuchElement(_) => FieldError::Missing,
            other => FieldError::Driver(other),
        }
    }
}

impl FieldError {
    /// The session died while reading this field.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FieldError::Driver(e) if e.is_fatal())
    }
}

pub type Field<T> = Result<T, FieldError>;

/// One element as read off the page, before normalization.
#[derive(Debug)]
pub struct RawReview {
    pub name: Field<String>,
    /// Date text as shown (relative phrase or ISO timestamp, per source).
    pub date: Field<String>,
    pub rating: Field<f64>,
    pub comment: Field<String>,
}

impl RawReview {
    fn session_lost(&self) -> bool {
        [
            self.name.as_ref().err(),
            self.date.as_ref().err(),
            self.rating.as_ref().err(),
            self.comment.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .any(FieldError::is_fatal)
    }
}

/// The one place a failed field turns into its placeholder.
pub fn or_sentinel<T>(field: Field<T>, what: &str, sentinel: impl FnOnce() -> T) -> T {
    match field {
        Ok(v) => v,
        Err(e) => {
            logd!("field {}: {} → sentinel", what, e);
            sentinel()
        }
    }
}

/// Trimmed text of the first `locator` match under `parent`. Blank → `Empty`.
pub fn text_in(session: &Session, parent: &ElementRef, locator: &Locator) -> Field<String> {
    let driver = session.driver();
    let el = driver.find_in(parent, locator)?;
    let text = driver.text(&el)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(FieldError::Empty);
    }
    Ok(s!(text))
}

/// Trimmed value of attribute `name` on the first `locator` match under `parent`.
pub fn attr_in(session: &Session, parent: &ElementRef, locator: &Locator, name: &str) -> Field<String> {
    let driver = session.driver();
    let el = driver.find_in(parent, locator)?;
    let value = driver.attribute(&el, name)?.ok_or(FieldError::Missing)?;
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Empty);
    }
    Ok(s!(value))
}

/* ---------------- Counts ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub found: usize,
    pub successful: usize,
    pub failed: usize,
    pub new: usize,
}

impl Counts {
    pub fn add(&mut self, other: Counts) {
        self.found += other.found;
        self.successful += other.successful;
        self.failed += other.failed;
        self.new += other.new;
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, rhs: Counts) {
        self.add(rhs);
    }
}

/* ---------------- Extractor ---------------- */

pub trait Extractor {
    fn source(&self) -> Source;

    /// Fixed wait after navigation before the page is touched.
    fn settle_ms(&self, pacing: &Pacing) -> u64 {
        pacing.page_load_ms
    }

    /// Get a freshly loaded page into a readable state. Best-effort.
    fn prepare(&self, _session: &Session) {}

    /// Review elements on the current page, in page order.
    fn locate(&self, session: &Session) -> Result<Vec<ElementRef>, DriverError>;

    fn read(&self, session: &Session, element: &ElementRef) -> RawReview;

    /// Date text → canonical date. Relative phrases by default.
    fn canonical_date(&self, text: &str, today: NaiveDate) -> String {
        date::normalize(text, today)
    }

    /// Locate, read, normalize and store every review on the current page.
    fn extract_all(&self, session: &Session, location: &str, store: &ReviewStore, today: NaiveDate) -> Counts {
        let elements = match self.locate(session) {
            Ok(v) => v,
            Err(e) => {
                logw!("{}: could not list reviews: {}", self.source(), e);
                return Counts::default();
            }
        };
        if elements.is_empty() {
            logf!("{}: no reviews found", self.source());
            return Counts::default();
        }

        let found = elements.len();
        logf!("{}: found {} reviews, processing", self.source(), found);
        let mut counts = Counts { found, ..Counts::default() };

        for element in &elements {
            let raw = self.read(session, element);
            if raw.session_lost() {
                loge!("{}: browser session lost after {} of {} reviews", self.source(), counts.successful, found);
                break;
            }
            let review = self.finish(raw, location, today);
            if store.append(&review) {
                counts.new += 1;
            }
            counts.successful += 1;
            pause(session.pacing().per_record_ms);
        }

        counts.failed = found - counts.successful;
        counts
    }

    /// Apply sentinels and derive the id.
    fn finish(&self, raw: RawReview, location: &str, today: NaiveDate) -> Review {
        let name = or_sentinel(raw.name, "name", || s!(ANONYMOUS));
        let date = or_sentinel(raw.date.map(|t| self.canonical_date(&t, today)), "date", || s!(NO_DATE));
        let rating = or_sentinel(raw.rating, "rating", || 0.0);
        let comment = or_sentinel(raw.comment, "comment", String::new);
        Review {
            id: identity::generate(self.source(), location, &name, &date),
            name,
            source: self.source(),
            location: s!(location),
            date,
            rating,
            comment,
        }
    }
}

/// The extractor for `source`, configured with its selectors.
pub fn for_source(source: Source, selectors: &Selectors) -> Box<dyn Extractor> {
    match source {
        Source::GoogleMaps => Box::new(GoogleMaps::new(selectors.google_maps.clone())),
        Source::TopRated => Box::new(TopRated::new(selectors.top_rated.clone())),
        Source::Expat => Box::new(ExpatForum::new(selectors.expat.clone())),
        Source::Trustburn => Box::new(Trustburn::new(selectors.trustburn.clone())),
    }
}
