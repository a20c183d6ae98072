// src/core/date.rs
//
// Human-written review dates → canonical `DD-MM-YYYY`.
//
// Sources give coarse relative dates ("a month ago", "il y a 2 ans") in English
// or French, or an ISO timestamp. Resolution order:
//   1. known phrase table (first hit, table order)
//   2. "<n> <unit>" anywhere in the text
//   3. ISO-8601 timestamp / plain date
//   4. "N/A"
//
// Months are 30 days and weeks exactly 7. Years step back whole calendar years,
// so "2 years ago" on 01-06-2024 is 01-06-2022.

use std::sync::OnceLock;

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::config::consts::{DATE_FORMAT, NO_DATE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Offset {
    Days(i64),
    Years(u32),
}

use Offset::*;

const PHRASES: &[(&str, Offset)] = &[
    // French
    ("il y a un an", Years(1)), ("il y a 1 an", Years(1)),
    ("il y a 2 ans", Years(2)), ("il y a 3 ans", Years(3)),
    ("il y a un mois", Days(30)), ("il y a 1 mois", Days(30)),
    ("il y a 2 mois", Days(60)), ("il y a 3 mois", Days(90)),
    ("il y a une semaine", Days(7)), ("il y a 1 semaine", Days(7)),
    ("il y a 2 semaines", Days(14)), ("il y a 3 semaines", Days(21)),
    ("il y a un jour", Days(1)), ("il y a 1 jour", Days(1)),
    ("il y a 2 jours", Days(2)), ("il y a 3 jours", Days(3)),
    ("depuis un an", Years(1)), ("depuis 1 an", Years(1)),
    // English
    ("a year ago", Years(1)), ("1 year ago", Years(1)),
    ("2 years ago", Years(2)), ("3 years ago", Years(3)),
    ("a month ago", Days(30)), ("1 month ago", Days(30)),
    ("2 months ago", Days(60)), ("3 months ago", Days(90)),
    ("a week ago", Days(7)), ("1 week ago", Days(7)),
    ("2 weeks ago", Days(14)), ("3 weeks ago", Days(21)),
    ("a day ago", Days(1)), ("1 day ago", Days(1)),
    ("2 days ago", Days(2)), ("3 days ago", Days(3)),
];

fn unit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+)\s*(years?|ans?|months?|mois|weeks?|semaines?|days?|jours?)\b")
            .expect("static regex")
    })
}

/// Canonical `DD-MM-YYYY` for `text` relative to `today`, or `"N/A"`.
pub fn normalize(text: &str, today: NaiveDate) -> String {
    resolve(text, today).map(format).unwrap_or_else(|| s!(NO_DATE))
}

/// Like [`normalize`] but only accepts an ISO-8601 timestamp or date.
pub fn normalize_iso(text: &str) -> String {
    parse_iso(text).map(format).unwrap_or_else(|| s!(NO_DATE))
}

pub fn format(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `"01-06-2024"` → 2024-06-01. `"N/A"` and anything else → `None`.
pub fn parse_canonical(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

pub fn resolve(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lc = text.trim().to_lowercase();
    if lc.is_empty() || lc == "n/a" {
        return None;
    }

    if let Some(offset) = match_phrase(&lc) {
        return apply(today, offset);
    }
    if let Some(offset) = match_unit(&lc) {
        return apply(today, offset);
    }
    parse_iso(text)
}

/// ISO-8601 with offset, naive datetime, or plain date → calendar date.
/// Timestamps with an offset keep the date as written (no conversion to UTC).
pub fn parse_iso(text: &str) -> Option<NaiveDate> {
    let t = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(t, "%Y-%m-%d").ok()
}

fn match_phrase(lc: &str) -> Option<Offset> {
    PHRASES
        .iter()
        .find(|(phrase, _)| contains_at_word_start(lc, phrase))
        .map(|(_, offset)| *offset)
}

// "2 days ago" must not fire inside "12 days ago".
fn contains_at_word_start(hay: &str, needle: &str) -> bool {
    hay.match_indices(needle).any(|(at, _)| {
        hay[..at].chars().next_back().map_or(true, |c| !c.is_alphanumeric())
    })
}

fn match_unit(lc: &str) -> Option<Offset> {
    let caps = unit_regex().captures(lc)?;
    let n: u32 = caps[1].parse().ok()?;
    let offset = match caps[2].trim_end_matches('s') {
        "year" | "an" => Years(n),
        "month" | "moi" => Days(30 * i64::from(n)),
        "week" | "semaine" => Days(7 * i64::from(n)),
        "day" | "jour" => Days(i64::from(n)),
        _ => return None,
    };
    Some(offset)
}

fn apply(today: NaiveDate, offset: Offset) -> Option<NaiveDate> {
    match offset {
        Days(d) => today.checked_sub_signed(Duration::try_days(d)?),
        Years(y) => today.checked_sub_months(Months::new(y.checked_mul(12)?)),
    }
}
