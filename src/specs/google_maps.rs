// src/specs/google_maps.rs
//
// Google Maps place page, reviews pane.
//
// The pane is lazy: only the first handful of reviews exist until the list is
// scrolled. `prepare` clicks through consent, opens the reviews tab and scrolls
// until the list stops growing (bounded). Long comments are cut behind a
// "More"/"Plus" button; it's clicked via script before the comment is read.

use crate::browser::{DriverError, ElementRef, Session};
use crate::config::options::pause;
use crate::config::selectors::GoogleMapsSelectors;
use crate::core::sanitize::{first_number, normalize_ws};
use crate::review::Source;

use super::{attr_in, text_in, Extractor, Field, FieldError, RawReview};

pub struct GoogleMaps {
    sel: GoogleMapsSelectors,
}

impl GoogleMaps {
    pub fn new(sel: GoogleMapsSelectors) -> Self {
        Self { sel }
    }

    /// Star count from the icon's aria-label ("4 étoiles", "Rated 4.0 out of 5").
    /// Whole stars only.
    fn rating(&self, session: &Session, el: &ElementRef) -> Field<f64> {
        let label = attr_in(session, el, &self.sel.rating, "aria-label")?;
        first_number(&label)
            .map(f64::trunc)
            .ok_or(FieldError::Unparseable(label))
    }

    fn comment(&self, session: &Session, el: &ElementRef) -> Field<String> {
        let driver = session.driver();
        if let Ok(more) = driver.find_in(el, &self.sel.expand) {
            if driver.script_click(&more).is_ok() {
                pause(session.pacing().expand_settle_ms);
            }
        }
        let text = normalize_ws(&text_in(session, el, &self.sel.comment)?);
        if text.is_empty() { Err(FieldError::Empty) } else { Ok(text) }
    }
}

impl Extractor for GoogleMaps {
    fn source(&self) -> Source {
        Source::GoogleMaps
    }

    fn prepare(&self, session: &Session) {
        session.prepare_reviews_view();
        session.load_all_content();
    }

    fn locate(&self, session: &Session) -> Result<Vec<ElementRef>, DriverError> {
        let found = session.find_all_first_match(&self.sel.reviews);
        if !found.is_empty() {
            return Ok(found);
        }
        logd!("Google Maps: no review selector matched, trying comment ancestors");
        session.driver().find_all(&self.sel.reviews_fallback)
    }

    fn read(&self, session: &Session, el: &ElementRef) -> RawReview {
        RawReview {
            name: text_in(session, el, &self.sel.name),
            rating: self.rating(session, el),
            date: text_in(session, el, &self.sel.date),
            comment: self.comment(session, el),
        }
    }
}
