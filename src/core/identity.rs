// src/core/identity.rs
//
// Dedup key for a review. None of the sources expose a review id, so the key
// is built from what we do have: `<tag>_<location>_<name>_<date>`, every
// non-alphanumeric char replaced by `_`, capped at ID_MAX_LEN chars.
//
// Same author + branch + source + day → same key. Two such reviews collide and
// the later one is dropped as a duplicate; nothing on the page can tell them apart.

use crate::config::consts::ID_MAX_LEN;
use crate::core::sanitize::key_part;
use crate::review::Source;

pub fn generate(source: Source, location: &str, name: &str, date: &str) -> String {
    let key = join!(
        source.tag(),
        "_",
        &key_part(location),
        "_",
        &key_part(name),
        "_",
        &key_part(date),
    );
    key.chars().take(ID_MAX_LEN).collect()
}
