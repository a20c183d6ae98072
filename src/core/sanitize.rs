// src/core/sanitize.rs
use std::sync::OnceLock;

use regex::Regex;

/// Collapse every run of whitespace (including CR/LF) into one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Replace every char outside `[A-Za-z0-9]` with `_`, one `_` per char.
/// Multi-byte chars count once, so `"Zoé"` becomes `"Zo_"`.
pub fn key_part(s: &str) -> String {
    s.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)").expect("static regex"))
}

fn width_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)width\s*:\s*(\d+)\s*%").expect("static regex"))
}

/// First decimal number in `s` (`"Rated 4.0 out of 5"` → `4.0`).
pub fn first_number(s: &str) -> Option<f64> {
    number_regex().captures(s)?[1].parse().ok()
}

/// `"width:80%;"` → `80`. Tolerates spaces and a missing `;`.
pub fn width_percent(style: &str) -> Option<u32> {
    width_regex().captures(style)?[1].parse().ok()
}
