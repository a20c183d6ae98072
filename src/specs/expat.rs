// src/specs/expat.rs
//
// expat.com forum thread. Every post counts as a review; forums have no
// rating, so it's always the 0 sentinel. Post time comes from the machine
// readable `datetime` attribute, not the displayed text.

use chrono::NaiveDate;

use crate::browser::{DriverError, ElementRef, Session};
use crate::config::selectors::ExpatSelectors;
use crate::config::Pacing;
use crate::core::date;
use crate::core::sanitize::normalize_ws;
use crate::review::Source;

use super::{attr_in, text_in, Extractor, FieldError, RawReview};

pub struct ExpatForum {
    sel: ExpatSelectors,
}

impl ExpatForum {
    pub fn new(sel: ExpatSelectors) -> Self {
        Self { sel }
    }
}

impl Extractor for ExpatForum {
    fn source(&self) -> Source {
        Source::Expat
    }

    fn settle_ms(&self, pacing: &Pacing) -> u64 {
        pacing.slow_page_load_ms
    }

    fn locate(&self, session: &Session) -> Result<Vec<ElementRef>, DriverError> {
        session.driver().find_all(&self.sel.post)
    }

    fn read(&self, session: &Session, el: &ElementRef) -> RawReview {
        RawReview {
            name: text_in(session, el, &self.sel.author),
            rating: Err(FieldError::Missing),
            date: attr_in(session, el, &self.sel.time, &self.sel.time_attr),
            comment: text_in(session, el, &self.sel.message).map(|c| normalize_ws(&c)),
        }
    }

    fn canonical_date(&self, text: &str, _today: NaiveDate) -> String {
        date::normalize_iso(text)
    }
}
