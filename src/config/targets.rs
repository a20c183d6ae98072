// src/config/targets.rs
//
// What to scrape. Defaults are the production deployment: twelve Google Maps
// branches plus three aggregator pages.

use serde::Deserialize;

use crate::review::Source;

/// One Google Maps place page (reviews pane URL).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MapsLocation {
    pub name: String,
    pub url: String,
}

/// One aggregator page reviewing a single branch.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SiteTarget {
    pub site: Source,
    pub url: String,
    pub location: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Targets {
    pub google_maps: Vec<MapsLocation>,
    pub sites: Vec<SiteTarget>,
}

/// One unit of work: a page to open and the branch its reviews belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target<'a> {
    pub source: Source,
    pub location: &'a str,
    pub url: &'a str,
}

impl Targets {
    /// Google Maps locations in configured order, then the aggregator sites.
    pub fn iter(&self) -> impl Iterator<Item = Target<'_>> {
        let maps = self.google_maps.iter().map(|m| Target {
            source: Source::GoogleMaps,
            location: &m.name,
            url: &m.url,
        });
        let sites = self.sites.iter().map(|s| Target {
            source: s.site,
            location: &s.location,
            url: &s.url,
        });
        maps.chain(sites)
    }

    pub fn len(&self) -> usize {
        self.google_maps.len() + self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const MAPS: &[(&str, &str)] = &[
    ("California Gym Centre Urbain Nord", "https://www.google.com/maps/place/California+Gym+Centre+Urbain+Nord/@36.8497481,10.1924261,17z/data=!4m8!3m7!1s0x12fd34c8cbbccc13:0xd457adab6be8aee4!8m2!3d36.8497439!4d10.197297!9m1!1b1!16s%2Fg%2F11dxs18wb_"),
    ("California Gym Lac 1", "https://www.google.com/maps/place/California+Gym+Lac+1/@36.8339787,10.2356224,17z/data=!4m8!3m7!1s0x12fd35007fe0806d:0xa71c1796442e6a29!8m2!3d36.8339745!4d10.2404933!9m1!1b1!16s%2Fg%2F11m67p1dlp"),
    ("California Gym Platinum", "https://www.google.com/maps/place/California+Gym+Platinum/@36.8449138,10.2778055,17z/data=!4m8!3m7!1s0x12fd4ab66ea16a55:0x7dd7ff7dbfc204cd!8m2!3d36.8449095!4d10.2803804!9m1!1b1!16s%2Fg%2F11c57ysqw8"),
    ("California Gym Mall", "https://www.google.com/maps/place/California+Gym+Mall/@36.847071,10.2780987,17z/data=!4m8!3m7!1s0x12fd4ab5f2afe9c1:0x7b36723ba1299a4a!8m2!3d36.8470667!4d10.2806736!9m1!1b1!16s%2Fg%2F11f_bzsb5c"),
    ("California Gym Soukra", "https://www.google.com/maps/place/California+Gym+Soukra/@36.8746327,10.2695407,17z/data=!4m8!3m7!1s0x12e2b51d9e5168f3:0x37eac499d8e07d27!8m2!3d36.8746285!4d10.2744116!9m1!1b1!16s%2Fg%2F11h71nfxq3"),
    ("California Gym Strength La Marsa", "https://www.google.com/maps/place/California+Gym+Strength+La+Marsa/@36.8851636,10.3188024,17z/data=!4m8!3m7!1s0x12e2b4f4711bf04b:0xb4605a34aaec41b!8m2!3d36.8851594!4d10.3236733!9m1!1b1!16s%2Fg%2F1232g62cq"),
    ("California Gym Zephyr", "https://www.google.com/maps/place/California+Gym+Zephyr/@36.8835414,10.328392,17z/data=!4m8!3m7!1s0x12e2b593b7a31291:0xfca503c99d4c51ff!8m2!3d36.8835372!4d10.3332629!9m1!1b1!16s%2Fg%2F11snczdqs2"),
    ("California Gym Boumhel", "https://www.google.com/maps/place/California+Gym+Boumhel/@36.7316581,10.3073693,17z/data=!4m8!3m7!1s0x12fd4994237d011b:0x2b984884a19cbaae!8m2!3d36.7316539!4d10.3122402!9m1!1b1!16s%2Fg%2F11j0v6mszq"),
    ("California Gym Bardo", "https://www.google.com/maps/place/California+GYM+BARDO/@36.8151127,10.1229798,17z/data=!4m8!3m7!1s0x12fd3390e951c1df:0x9f85266b728bada!8m2!3d36.8151085!4d10.1278507!9m1!1b1!16s%2Fg%2F11h32yshz1"),
    ("California Gym Jardins d'El Menzah", "https://www.google.com/maps/place/California+Gym+Jardins+d'El+Menzah/@36.8541437,10.1267301,17z/data=!4m8!3m7!1s0x12fd33e9f3d4781f:0x4a1b896957f5b0e2!8m2!3d36.8541395!4d10.131601!9m1!1b1!16s%2Fg%2F11lnlqyqlj"),
    ("California Gym Ennasr", "https://www.google.com/maps/place/California+gym+ennasr/@36.8604516,10.1424522,17z/data=!4m8!3m7!1s0x12fd3300455d3a11:0x490eb1336e440539!8m2!3d36.8604474!4d10.1473231!9m1!1b1!16s%2Fg%2F11wh3h3zvp"),
    ("California Gym Sousse", "https://www.google.com/maps/place/California+Gym+Sousse/@35.8416028,10.6248022,17z/data=!4m8!3m7!1s0x130275b8469424b5:0x685a7499cac68ad1!8m2!3d35.8415985!4d10.6273771!9m1!1b1!16s%2Fg%2F11gjs77nc_"),
];

const SITES: &[(Source, &str, &str)] = &[
    (
        Source::TopRated,
        "https://www.top-rated.online/cities/Tunis/place/p/4803828/California+Gym+Platinum",
        "California Gym Platinum",
    ),
    (
        Source::Expat,
        "https://www.expat.com/fr/forum/afrique/tunisie/tunis/162222-que-pensez-vous-du-california-gym-aux-berges-du-lac-1-.html",
        "California Gym Lac 1",
    ),
    (
        Source::Trustburn,
        "https://trustburn.com/reviews/california-gym-tunisia",
        "California Gym Lac 1",
    ),
];

impl Default for Targets {
    fn default() -> Self {
        Self {
            google_maps: MAPS
                .iter()
                .map(|(name, url)| MapsLocation { name: s!(*name), url: s!(*url) })
                .collect(),
            sites: SITES
                .iter()
                .map(|(site, url, location)| SiteTarget {
                    site: *site,
                    url: s!(*url),
                    location: s!(*location),
                })
                .collect(),
        }
    }
}
