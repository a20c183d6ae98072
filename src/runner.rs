// src/runner.rs
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::browser::{DriverError, Session};
use crate::config::options::pause;
use crate::config::{Selectors, Target, Targets};
use crate::progress::Progress;
use crate::review::Source;
use crate::specs::{self, Counts, Extractor};
use crate::store::ReviewStore;

/// What a run did.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub totals: Counts,
    /// Reviews in the dataset before / after the run.
    pub initial: usize,
    pub final_count: usize,
    pub elapsed: Duration,
    pub targets: usize,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Top-level runner: every Google Maps location, then every aggregator site.
///
/// A target that fails contributes zero counts; the run goes on. Records are
/// stored one at a time, so an interrupted run keeps what it wrote and a re-run
/// only adds what's missing.
pub fn run(
    session: &Session,
    store: &ReviewStore,
    targets: &Targets,
    selectors: &Selectors,
    today: NaiveDate,
    mut progress: Option<&mut dyn Progress>,
) -> RunSummary {
    let start = Instant::now();
    let initial = store.count();
    let total = targets.len();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(total);
    }

    let list: Vec<Target<'_>> = targets.iter().collect();
    let mut totals = Counts::default();

    for (i, target) in list.iter().enumerate() {
        let first_of_kind = i == 0 || (list[i - 1].source == Source::GoogleMaps) != (target.source == Source::GoogleMaps);
        if first_of_kind {
            let banner = if target.source == Source::GoogleMaps { "Google Maps" } else { "Other websites" };
            logf!("== {} ==", banner);
            if let Some(p) = progress.as_deref_mut() {
                p.log(banner);
            }
        }
        if let Some(p) = progress.as_deref_mut() {
            p.target_start(i, target);
        }

        let extractor = specs::for_source(target.source, selectors);
        let counts = match collect_target(session, extractor.as_ref(), target, store, today) {
            Ok(c) => c,
            Err(e) => {
                logw!("{} ({}): {}", target.location, target.source, e);
                Counts::default()
            }
        };
        logf!(
            "{} ({}): found {}, successful {}, failed {}, new {}",
            target.location, target.source, counts.found, counts.successful, counts.failed, counts.new
        );
        totals += counts;

        if let Some(p) = progress.as_deref_mut() {
            p.target_done(target, &counts);
        }

        if pause_after(&list, i) {
            pause(session.pacing().between_targets_ms);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    RunSummary {
        totals,
        initial,
        final_count: store.count(),
        elapsed: start.elapsed(),
        targets: total,
        path: store.path().to_path_buf(),
        size_bytes: store.size_bytes(),
    }
}

/// Open one target's page and extract everything on it.
pub fn collect_target(
    session: &Session,
    extractor: &dyn Extractor,
    target: &Target<'_>,
    store: &ReviewStore,
    today: NaiveDate,
) -> Result<Counts, DriverError> {
    session.navigate(target.url, extractor.settle_ms(session.pacing()))?;
    extractor.prepare(session);
    Ok(extractor.extract_all(session, target.location, store, today))
}

/// Between Google locations (not after the last one), and after every site.
fn pause_after(list: &[Target<'_>], i: usize) -> bool {
    match list[i].source {
        Source::GoogleMaps => list.get(i + 1).is_some_and(|next| next.source == Source::GoogleMaps),
        _ => true,
    }
}
