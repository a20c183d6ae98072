// src/review.rs
//
// The persisted unit: one review, every field always present.
// Column order matches `DATASET_HEADERS`.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::config::consts::NO_DATE;
use crate::core::date::parse_canonical;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Source {
    GoogleMaps,
    TopRated,
    Expat,
    Trustburn,
}

impl Source {
    pub const ALL: [Source; 4] = [Source::GoogleMaps, Source::TopRated, Source::Expat, Source::Trustburn];

    /// Value written to the `source` column.
    pub fn label(&self) -> &'static str {
        match self {
            Source::GoogleMaps => "Google Maps",
            Source::TopRated => "top-rated.online",
            Source::Expat => "expat.com",
            Source::Trustburn => "trustburn.com",
        }
    }

    /// Short prefix of the review id.
    pub fn tag(&self) -> &'static str {
        match self {
            Source::GoogleMaps => "google",
            Source::TopRated => "toprated",
            Source::Expat => "expat",
            Source::Trustburn => "trustburn",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Source {
    type Err = String;

    /// Accepts the label or the tag, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Source::ALL
            .into_iter()
            .find(|src| src.label().eq_ignore_ascii_case(s) || src.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown source: {s:?}"))
    }
}

impl TryFrom<String> for Source {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Review {
    pub id: String,
    pub name: String,
    pub source: Source,
    pub location: String,
    pub date: String,
    pub rating: f64,
    pub comment: String,
}

impl Review {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            s!(self.source.label()),
            self.location.clone(),
            self.date.clone(),
            format_rating(self.rating),
            self.comment.clone(),
        ]
    }

    /// Inverse of [`Review::to_row`]. `None` for short rows, an unknown source
    /// or a date that is neither `DD-MM-YYYY` nor `N/A`.
    /// An unreadable rating loads as 0.
    pub fn from_row(row: &[String]) -> Option<Review> {
        let [id, name, source, location, date, rating, comment] = row.get(..7)? else {
            return None;
        };
        if date != NO_DATE && parse_canonical(date).is_none() {
            return None;
        }
        Some(Review {
            id: id.clone(),
            name: name.clone(),
            source: source.parse().ok()?,
            location: location.clone(),
            date: date.clone(),
            rating: rating.trim().parse().unwrap_or(0.0),
            comment: comment.clone(),
        })
    }
}

/// `4.0` → `"4"`, `3.8` → `"3.8"`.
pub fn format_rating(r: f64) -> String {
    if r.is_finite() { format!("{r}") } else { s!("0") }
}
