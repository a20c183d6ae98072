// tests/extract_pages.rs
mod common;

use chrono::NaiveDate;

use common::{dataset_path, FakeDriver, FakePage};
use gym_reviews::config::selectors::{ExpatSelectors, GoogleMapsSelectors, TopRatedSelectors, TrustburnSelectors};
use gym_reviews::review::Source;
use gym_reviews::specs::{Counts, ExpatForum, Extractor, GoogleMaps, TopRated, Trustburn};
use gym_reviews::store::ReviewStore;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Five top-rated blocks; `r3` has no children.
fn five_blocks() -> FakePage {
    let sel = TopRatedSelectors::default();
    let mut page = FakePage::new();
    page.add(&sel.review, &["r1", "r2", "r3", "r4", "r5"]);
    for (i, id) in ["r1", "r2", "r4", "r5"].iter().enumerate() {
        page.child(id, &sel.name, &format!("{id}-name"), &format!("Member {i}"))
            .child(id, &sel.rating, &format!("{id}-rating"), "4.0")
            .child(id, &sel.info, &format!("{id}-info"), "2 weeks ago on Google")
            .child(id, &sel.comment, &format!("{id}-comment"), "Great\n  equipment,\r\n friendly staff");
    }
    page
}

/// Every lookup under `r3` finds nothing.
fn top_rated_page() -> FakePage {
    let mut page = five_blocks();
    page.broken("r3");
    page
}

#[test]
fn element_without_fields_still_yields_a_record() {
    let (_dir, path) = dataset_path();
    let store = ReviewStore::open(&path).unwrap();
    let session = FakeDriver::on(top_rated_page()).session();
    let tr = TopRated::new(TopRatedSelectors::default());

    let counts = tr.extract_all(&session, "California Gym Platinum", &store, today());
    assert_eq!(counts, Counts { found: 5, successful: 5, failed: 0, new: 5 });

    let rows = store.load().unwrap();
    assert_eq!(rows.len(), 5);

    let blank = &rows[2];
    assert_eq!(blank.name, "Anonymous");
    assert_eq!(blank.date, "N/A");
    assert_eq!(blank.rating, 0.0);
    assert_eq!(blank.comment, "");
    assert_eq!(blank.id, "toprated_California_Gym_Platinum_Anonymous_N_A");

    let first = &rows[0];
    assert_eq!(first.name, "Member 0");
    assert_eq!(first.source, Source::TopRated);
    assert_eq!(first.date, "18-05-2024");
    assert_eq!(first.rating, 4.0);
    assert_eq!(first.comment, "Great equipment, friendly staff");
}

#[test]
fn element_failing_every_lookup_still_yields_a_record() {
    let (_dir, path) = dataset_path();
    let store = ReviewStore::open(&path).unwrap();
    let mut page = five_blocks();
    page.stale("r3");
    let session = FakeDriver::on(page).session();
    let tr = TopRated::new(TopRatedSelectors::default());

    let counts = tr.extract_all(&session, "California Gym Platinum", &store, today());
    assert_eq!(counts, Counts { found: 5, successful: 5, failed: 0, new: 5 });

    let rows = store.load().unwrap();
    assert_eq!(rows.len(), 5);
    let stale = &rows[2];
    assert_eq!(stale.name, "Anonymous");
    assert_eq!(stale.date, "N/A");
    assert_eq!(stale.rating, 0.0);
    assert_eq!(stale.comment, "");
    assert_eq!(stale.id, "toprated_California_Gym_Platinum_Anonymous_N_A");
    assert_eq!(rows[3].name, "Member 2");
}

#[test]
fn second_pass_adds_nothing() {
    let (_dir, path) = dataset_path();
    let store = ReviewStore::open(&path).unwrap();
    let session = FakeDriver::on(top_rated_page()).session();
    let tr = TopRated::new(TopRatedSelectors::default());

    tr.extract_all(&session, "Loc", &store, today());
    let again = tr.extract_all(&session, "Loc", &store, today());
    assert_eq!(again, Counts { found: 5, successful: 5, failed: 0, new: 0 });
    assert_eq!(store.count(), 5);
}

#[test]
fn empty_page_counts_nothing() {
    let (_dir, path) = dataset_path();
    let store = ReviewStore::open(&path).unwrap();
    let session = FakeDriver::on(FakePage::new()).session();
    let tb = Trustburn::new(TrustburnSelectors::default());

    assert_eq!(tb.extract_all(&session, "Loc", &store, today()), Counts::default());
    assert_eq!(store.count(), 0);
}

#[test]
fn lost_session_abandons_the_page() {
    let (_dir, path) = dataset_path();
    let store = ReviewStore::open(&path).unwrap();
    let mut page = top_rated_page();
    page.dead("r2");
    let session = FakeDriver::on(page).session();
    let tr = TopRated::new(TopRatedSelectors::default());

    let counts = tr.extract_all(&session, "Loc", &store, today());
    assert_eq!(counts, Counts { found: 5, successful: 1, failed: 4, new: 1 });
    assert_eq!(store.count(), 1);
}

#[test]
fn google_maps_reads_stars_and_expands_comments() {
    let sel = GoogleMapsSelectors::default();
    let mut page = FakePage::new();
    page.add(&sel.reviews[1], &["g1", "g2"]);
    page.child("g1", &sel.name, "g1-name", "Jane Doe")
        .child("g1", &sel.rating, "g1-stars", "")
        .attr("g1-stars", "aria-label", "4 étoiles")
        .child("g1", &sel.date, "g1-date", "il y a une semaine")
        .child("g1", &sel.expand, "g1-more", "Plus")
        .child("g1", &sel.comment, "g1-text", "Super salle\n\nbien équipée");
    page.child("g2", &sel.name, "g2-name", "Sam")
        .child("g2", &sel.rating, "g2-stars", "")
        .attr("g2-stars", "aria-label", "Rated 4.5 out of 5,")
        .child("g2", &sel.date, "g2-date", "3 years ago");

    let driver = FakeDriver::on(page);
    let session = driver.session();
    let (_dir, path) = dataset_path();
    let store = ReviewStore::open(&path).unwrap();
    let gm = GoogleMaps::new(sel);

    let counts = gm.extract_all(&session, "Lac 1", &store, today());
    assert_eq!(counts, Counts { found: 2, successful: 2, failed: 0, new: 2 });
    assert_eq!(driver.count("script_click g1-more"), 1);

    let rows = store.load().unwrap();
    assert_eq!(rows[0].id, "google_Lac_1_Jane_Doe_25_05_2024");
    assert_eq!(rows[0].rating, 4.0);
    assert_eq!(rows[0].comment, "Super salle bien équipée");
    assert_eq!(rows[1].rating, 4.0);
    assert_eq!(rows[1].date, "01-06-2021");
    assert_eq!(rows[1].comment, "");
}

#[test]
fn google_maps_falls_back_to_comment_ancestors() {
    let sel = GoogleMapsSelectors::default();
    let mut page = FakePage::new();
    page.add(&sel.reviews_fallback, &["p1"]);
    page.child("p1", &sel.comment, "p1-text", "ok");

    let session = FakeDriver::on(page).session();
    let (_dir, path) = dataset_path();
    let store = ReviewStore::open(&path).unwrap();

    let counts = GoogleMaps::new(sel).extract_all(&session, "Loc", &store, today());
    assert_eq!(counts.found, 1);
    assert_eq!(store.load().unwrap()[0].name, "Anonymous");
}

#[test]
fn trustburn_sums_star_fills() {
    let sel = TrustburnSelectors::default();
    let mut page = FakePage::new();
    page.add(&sel.review, &["t1", "t2"]);
    page.child("t1", &sel.author, "t1-user", "Karim")
        .child("t1", &sel.date, "t1-date", "2 months ago")
        .child("t1", &sel.comment, "t1-text", "Trop cher");
    for (i, w) in ["width:100%;", "width:100%;", "width:100%;", "width:50%;", "width:0%;"].iter().enumerate() {
        let id = format!("t1-star{i}");
        page.child("t1", &sel.stars, &id, "").attr(&id, "style", w);
    }
    page.child("t2", &sel.author, "t2-user", "Lina")
        .child("t2", &sel.stars, "t2-star0", "")
        .attr("t2-star0", "style", "width:auto");

    let session = FakeDriver::on(page).session();
    let (_dir, path) = dataset_path();
    let store = ReviewStore::open(&path).unwrap();

    Trustburn::new(sel).extract_all(&session, "Lac 1", &store, today());
    let rows = store.load().unwrap();
    assert_eq!(rows[0].rating, 3.5);
    assert_eq!(rows[0].date, "02-04-2024");
    assert_eq!(rows[1].rating, 0.0);
    assert_eq!(rows[1].source, Source::Trustburn);
}

#[test]
fn trustburn_absurd_fills_fall_back_to_zero() {
    let sel = TrustburnSelectors::default();
    let mut page = FakePage::new();
    page.add(&sel.review, &["t1"]);
    page.child("t1", &sel.author, "t1-user", "Omar");
    for i in 0..2 {
        let id = format!("t1-star{i}");
        page.child("t1", &sel.stars, &id, "").attr(&id, "style", "width:4000000000%;");
    }

    let session = FakeDriver::on(page).session();
    let (_dir, path) = dataset_path();
    let store = ReviewStore::open(&path).unwrap();

    let counts = Trustburn::new(sel).extract_all(&session, "Lac 1", &store, today());
    assert_eq!(counts, Counts { found: 1, successful: 1, failed: 0, new: 1 });
    let rows = store.load().unwrap();
    assert_eq!(rows[0].name, "Omar");
    assert_eq!(rows[0].rating, 0.0);
}

#[test]
fn expat_posts_use_iso_time_and_no_rating() {
    let sel = ExpatSelectors::default();
    let mut page = FakePage::new();
    page.add(&sel.post, &["e1", "e2"]);
    page.child("e1", &sel.author, "e1-user", "Nadia")
        .child("e1", &sel.time, "e1-time", "5 mars 2019")
        .attr("e1-time", "datetime", "2019-03-05T10:12:00+01:00")
        .child("e1", &sel.message, "e1-msg", "Bonjour,\nquelqu'un connait ?");
    page.child("e2", &sel.author, "e2-user", "Yann")
        .child("e2", &sel.time, "e2-time", "il y a 2 jours");

    let session = FakeDriver::on(page).session();
    let (_dir, path) = dataset_path();
    let store = ReviewStore::open(&path).unwrap();

    ExpatForum::new(sel).extract_all(&session, "California Gym Lac 1", &store, today());
    let rows = store.load().unwrap();
    assert_eq!(rows[0].date, "05-03-2019");
    assert_eq!(rows[0].rating, 0.0);
    assert_eq!(rows[0].comment, "Bonjour, quelqu'un connait ?");
    // no datetime attribute: displayed text is not used
    assert_eq!(rows[1].date, "N/A");
    assert_eq!(rows[1].id, "expat_California_Gym_Lac_1_Yann_N_A");
}
