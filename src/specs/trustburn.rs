// src/specs/trustburn.rs
//
// trustburn.com company page. The score is drawn as five star icons, each
// partially filled through an inline `style="width:NN%;"`; the rating is the
// sum of the fills (100% = 1 star).

use crate::browser::{DriverError, ElementRef, Session};
use crate::config::selectors::TrustburnSelectors;
use crate::config::Pacing;
use crate::core::sanitize::{normalize_ws, width_percent};
use crate::review::Source;

use super::{text_in, Extractor, Field, FieldError, RawReview};

pub struct Trustburn {
    sel: TrustburnSelectors,
}

impl Trustburn {
    pub fn new(sel: TrustburnSelectors) -> Self {
        Self { sel }
    }

    /// Any star without a readable width spoils the whole rating.
    fn rating(&self, session: &Session, el: &ElementRef) -> Field<f64> {
        let driver = session.driver();
        let stars = driver.find_all_in(el, &self.sel.stars)?;
        if stars.is_empty() {
            return Err(FieldError::Missing);
        }
        let mut percent: u32 = 0;
        for star in &stars {
            let style = driver.attribute(star, "style")?.unwrap_or_default();
            let sum = width_percent(&style).and_then(|w| percent.checked_add(w));
            percent = sum.ok_or(FieldError::Unparseable(style))?;
        }
        Ok(f64::from(percent) / 100.0)
    }
}

impl Extractor for Trustburn {
    fn source(&self) -> Source {
        Source::Trustburn
    }

    fn settle_ms(&self, pacing: &Pacing) -> u64 {
        pacing.slow_page_load_ms
    }

    fn locate(&self, session: &Session) -> Result<Vec<ElementRef>, DriverError> {
        session.driver().find_all(&self.sel.review)
    }

    fn read(&self, session: &Session, el: &ElementRef) -> RawReview {
        RawReview {
            name: text_in(session, el, &self.sel.author),
            rating: self.rating(session, el),
            date: text_in(session, el, &self.sel.date),
            comment: text_in(session, el, &self.sel.comment).map(|c| normalize_ws(&c)),
        }
    }
}
