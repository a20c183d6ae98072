// src/config/selectors.rs
//
// Structural selectors per site. These are the values the sites used when the
// extractors were written; sites drift, so every set can be overridden from the
// config file (`[selectors.<site>]`). Unset keys keep these defaults.

use serde::Deserialize;

use crate::browser::Locator;

fn xpaths(list: &[&str]) -> Vec<Locator> {
    list.iter().map(|x| Locator::xpath(x)).collect()
}

/// Selectors the session manager needs to get a page into a readable state.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageSelectors {
    /// Consent dialog "accept" buttons, tried in order.
    pub consent_buttons: Vec<Locator>,
    /// Buttons that open the reviews sub-view, tried in order.
    pub review_tabs: Vec<Locator>,
    /// If this matches anything, the reviews view is already open.
    pub reviews_present: Locator,
    /// Scrollable containers, tried in order; first match wins.
    pub scroll_containers: Vec<Locator>,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            consent_buttons: xpaths(&[
                "//button[contains(., 'Accept all')]",
                "//button[contains(., 'Tout accepter')]",
                "//button[contains(@aria-label, 'Accept all')]",
                "//button[contains(@class, 'accept')]",
            ]),
            review_tabs: xpaths(&[
                "//button[contains(., 'Reviews')]",
                "//button[contains(., 'Avis')]",
                "//button[contains(@aria-label, 'reviews')]",
                "//button[@data-tab-index='1']",
            ]),
            reviews_present: Locator::xpath(r#"//div[contains(@class, "jftiEf")]"#),
            scroll_containers: xpaths(&[
                r#"//div[@role="main"]"#,
                r#"//div[contains(@class, "m6QErb")]"#,
                r#"//div[contains(@jsaction, "scroll")]"#,
                r#"//div[@class="m6QErb DxyBCb kA9KIf dS8AEf"]"#,
            ]),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GoogleMapsSelectors {
    /// Review element candidates; the first one returning anything wins.
    pub reviews: Vec<Locator>,
    /// Last resort: parent of a comment span.
    pub reviews_fallback: Locator,
    pub name: Locator,
    pub rating: Locator,
    pub date: Locator,
    pub expand: Locator,
    pub comment: Locator,
}

impl Default for GoogleMapsSelectors {
    fn default() -> Self {
        Self {
            reviews: xpaths(&[
                r#"//div[@class="jftiEf fontBodyMedium "]"#,
                r#"//div[contains(@class, "jftiEf")]"#,
                r#"//div[@data-review-id]"#,
                r#"//div[contains(@jsaction, "mouseover")]"#,
            ]),
            reviews_fallback: Locator::xpath(r#"//span[@class="wiI7pd"]/ancestor::div[1]"#),
            name: Locator::xpath(r#".//div[contains(@class, "d4r55")]"#),
            rating: Locator::xpath(r#".//span[@class="kvMYJc"]"#),
            date: Locator::xpath(r#".//span[@class="rsqaWe"]"#),
            expand: Locator::xpath(r#".//button[contains(., "More") or contains(., "Plus")]"#),
            comment: Locator::xpath(r#".//span[@class="wiI7pd"]"#),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TopRatedSelectors {
    pub review: Locator,
    pub rating: Locator,
    pub name: Locator,
    /// "<relative date> on Google" info line.
    pub info: Locator,
    /// Everything from this marker on is dropped from the info line.
    pub info_cutoff: String,
    pub comment: Locator,
}

impl Default for TopRatedSelectors {
    fn default() -> Self {
        Self {
            review: Locator::css("div.border-b"),
            rating: Locator::css("span.text-white"),
            name: Locator::css("span.font-semibold a"),
            info: Locator::css("div.text-sm"),
            info_cutoff: s!("on Google"),
            comment: Locator::css("p.text-gray-700"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExpatSelectors {
    pub post: Locator,
    pub author: Locator,
    pub time: Locator,
    /// Attribute on `time` holding the ISO timestamp.
    pub time_attr: String,
    pub message: Locator,
}

impl Default for ExpatSelectors {
    fn default() -> Self {
        Self {
            post: Locator::css("div.card-post"),
            author: Locator::css("a.card-post--content--author--username"),
            time: Locator::css("time"),
            time_attr: s!("datetime"),
            message: Locator::css("div.card-post--content--message"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrustburnSelectors {
    pub review: Locator,
    pub author: Locator,
    /// Star icons; each carries `style="width:NN%;"`.
    pub stars: Locator,
    pub date: Locator,
    pub comment: Locator,
}

impl Default for TrustburnSelectors {
    fn default() -> Self {
        Self {
            review: Locator::css("article.review-card"),
            author: Locator::css("div.username span"),
            stars: Locator::css("i.fa-star.rate"),
            date: Locator::css("time.datetime"),
            comment: Locator::css("p.text"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub page: PageSelectors,
    pub google_maps: GoogleMapsSelectors,
    pub top_rated: TopRatedSelectors,
    pub expat: ExpatSelectors,
    pub trustburn: TrustburnSelectors,
}
