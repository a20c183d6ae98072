// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

pub const BOM: &str = "\u{feff}";

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant). Blank lines are skipped.
///
/// A quote still open at end of input means a torn last row: that row is
/// dropped and parsing resumes on the line after the one where that row's
/// first quote opened, so rows appended behind it survive.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut row_quote = None;
    let mut chars = text.char_indices().peekable();

    while let Some((at, ch)) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some((_, '"'))) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                    row_quote.get_or_insert(at);
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some((_, '\n'))) { chars.next(); }
                row.push(take(&mut field));
                row_quote = None;
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    if let (true, Some(at)) = (in_quotes, row_quote) {
        if let Some(nl) = text[at..].find('\n') {
            rows.extend(parse_rows(&text[at + nl + 1..], sep));
        }
        return rows;
    }

    // Flush a trailing row without newline (also a crash-truncated last row).
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// What must be written before the next row so it starts on a line of its own:
/// `None` for a clean file, else a line end, closing an open quote first.
pub fn tail_repair(text: &str) -> Option<&'static str> {
    if text.chars().filter(|&c| c == '"').count() % 2 == 1 {
        return Some("\"\r\n");
    }
    if text.is_empty() || text.ends_with('\n') {
        return None;
    }
    Some("\r\n")
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single row with minimal quoting. Line ends with CRLF, like
/// spreadsheet tools expect.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    w.write_all(b"\r\n")
}
