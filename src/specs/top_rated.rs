// src/specs/top_rated.rs
//
// top-rated.online place page. Server-rendered, no scrolling needed.
//
// Each block: score badge ("4.0"), author link, an info line like
// "2 months ago on Google" and the comment paragraph.

use crate::browser::{DriverError, ElementRef, Session};
use crate::config::selectors::TopRatedSelectors;
use crate::core::sanitize::normalize_ws;
use crate::review::Source;

use super::{text_in, Extractor, Field, FieldError, RawReview};

pub struct TopRated {
    sel: TopRatedSelectors,
}

impl TopRated {
    pub fn new(sel: TopRatedSelectors) -> Self {
        Self { sel }
    }

    fn rating(&self, session: &Session, el: &ElementRef) -> Field<f64> {
        let text = text_in(session, el, &self.sel.rating)?;
        text.replace(',', ".").parse().map_err(|_| FieldError::Unparseable(text))
    }

    /// Info line up to the "on Google" marker.
    fn date_text(&self, session: &Session, el: &ElementRef) -> Field<String> {
        let info = text_in(session, el, &self.sel.info)?;
        let head = match info.find(self.sel.info_cutoff.as_str()) {
            Some(at) if !self.sel.info_cutoff.is_empty() => &info[..at],
            _ => info.as_str(),
        };
        let head = head.trim();
        if head.is_empty() { Err(FieldError::Empty) } else { Ok(s!(head)) }
    }
}

impl Extractor for TopRated {
    fn source(&self) -> Source {
        Source::TopRated
    }

    fn locate(&self, session: &Session) -> Result<Vec<ElementRef>, DriverError> {
        session.driver().find_all(&self.sel.review)
    }

    fn read(&self, session: &Session, el: &ElementRef) -> RawReview {
        RawReview {
            name: text_in(session, el, &self.sel.name),
            rating: self.rating(session, el),
            date: self.date_text(session, el),
            comment: text_in(session, el, &self.sel.comment).map(|c| normalize_ws(&c)),
        }
    }
}
