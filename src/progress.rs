// src/progress.rs
use crate::config::Target;
use crate::specs::Counts;

/// Lightweight progress reporting for a collection run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of targets.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A target is about to be opened.
    fn target_start(&mut self, _index: usize, _target: &Target<'_>) {}

    /// A target is done (zero counts if it failed).
    fn target_done(&mut self, _target: &Target<'_>, _counts: &Counts) {}

    /// Called at the end.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
