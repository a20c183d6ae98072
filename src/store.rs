// src/store.rs
//
// Append-only review dataset on disk.
//
// - Created once with BOM + header; never rewritten or truncated afterwards.
// - `append` re-reads every id before writing. O(n) per call, fine for a few
//   thousand rows, and the file stays the single source of truth.
// - A crash mid-append can leave a torn last row. The next append ends that
//   line first (closing a dangling quote), so rows before and after it parse.
// - One writer at a time. There's no locking.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::consts::{DATASET_HEADERS, DATASET_SEP};
use crate::csv::{self, parse_rows, BOM};
use crate::review::Review;

pub struct ReviewStore {
    path: PathBuf,
}

impl ReviewStore {
    /// Open the dataset at `path`, creating parent dirs and the header if absent.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if !path.exists() {
            let mut out = BufWriter::new(fs::File::create(&path)?);
            out.write_all(BOM.as_bytes())?;
            csv::write_row(&mut out, &DATASET_HEADERS, DATASET_SEP)?;
            out.flush()?;
            logd!("Store: created {}", path.display());
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, id: &str) -> bool {
        self.ids().map(|ids| ids.contains(id)).unwrap_or(false)
    }

    /// Append `review` unless its id is already stored.
    /// Returns whether a row was written; I/O errors are logged and count as `false`.
    pub fn append(&self, review: &Review) -> bool {
        match self.try_append(review) {
            Ok(added) => added,
            Err(e) => {
                loge!("Store: failed to append {}: {}", review.id, e);
                false
            }
        }
    }

    fn try_append(&self, review: &Review) -> io::Result<bool> {
        let text = self.read_text()?;
        if ids_of(rows_of(&text)).contains(&review.id) {
            return Ok(false);
        }
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut out = BufWriter::new(file);
        if let Some(fix) = csv::tail_repair(&text) {
            logw!("Store: {} ended mid-row, terminating it before appending", self.path.display());
            out.write_all(fix.as_bytes())?;
        }
        csv::write_row(&mut out, &review.to_row(), DATASET_SEP)?;
        out.flush()?;
        Ok(true)
    }

    /// Number of stored reviews (header excluded). Unreadable file → 0.
    pub fn count(&self) -> usize {
        self.data_rows().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn ids(&self) -> io::Result<HashSet<String>> {
        Ok(ids_of(self.data_rows()?))
    }

    /// All readable reviews in file order. Malformed rows are skipped.
    pub fn load(&self) -> io::Result<Vec<Review>> {
        let rows = self.data_rows()?;
        let total = rows.len();
        let reviews: Vec<Review> = rows.iter().filter_map(|r| Review::from_row(r)).collect();
        if reviews.len() < total {
            logw!("Store: skipped {} malformed row(s) in {}", total - reviews.len(), self.path.display());
        }
        Ok(reviews)
    }

    /// File size in bytes, 0 if missing.
    pub fn size_bytes(&self) -> u64 {
        fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
    }

    fn read_text(&self) -> io::Result<String> {
        let bytes = fs::read(&self.path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn data_rows(&self) -> io::Result<Vec<Vec<String>>> {
        Ok(rows_of(&self.read_text()?))
    }
}

/// Parsed rows without the header.
fn rows_of(text: &str) -> Vec<Vec<String>> {
    let mut rows = parse_rows(text, DATASET_SEP);
    if rows.first().is_some_and(|h| h.first().is_some_and(|c| c == DATASET_HEADERS[0])) {
        rows.remove(0);
    }
    rows
}

fn ids_of(rows: Vec<Vec<String>>) -> HashSet<String> {
    rows.into_iter()
        .filter_map(|mut row| {
            let id = row.swap_remove(0);
            if id.is_empty() { None } else { Some(id) }
        })
        .collect()
}
