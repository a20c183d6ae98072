// src/browser/session.rs
//
// Session manager: owns the browser for the whole run.
//
// Every lookup/interaction here is best-effort. A missing button, a stale
// element or a failed click means "feature not present" and the flow moves on
// degraded. Only opening the session can fail hard.

use std::time::Instant;

use serde_json::Value;

use super::{Driver, DriverError, ElementRef, Locator, ScrollTarget, WebDriver};
use crate::config::options::pause;
use crate::config::selectors::PageSelectors;
use crate::config::{BrowserOptions, Pacing};

/// Clicks the first button whose text or aria-label mentions reviews.
const REVIEWS_TAB_SCRIPT: &str = r#"
var buttons = document.querySelectorAll('button');
for (var btn of buttons) {
    var text = (btn.textContent || btn.innerText || '').toLowerCase();
    var aria = (btn.getAttribute('aria-label') || '').toLowerCase();
    if (text.includes('review') || text.includes('avis') || aria.includes('review')) {
        btn.click();
        return true;
    }
}
return false;
"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollScope {
    Container,
    Window,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollOutcome {
    pub scope: ScrollScope,
    /// Scroll actions performed (never more than the scope's budget).
    pub scrolls: u32,
    /// Height stopped growing before the budget ran out.
    pub settled: bool,
}

pub struct Session {
    driver: Box<dyn Driver>,
    pacing: Pacing,
    page: PageSelectors,
    closed: bool,
}

impl Session {
    /// Start a browser through the WebDriver server. The only fatal step of a run.
    pub fn open(browser: &BrowserOptions, pacing: Pacing, page: PageSelectors) -> Result<Self, DriverError> {
        let driver = WebDriver::connect(browser)?;
        Ok(Self::with_driver(Box::new(driver), pacing, page))
    }

    /// Wrap an already-running driver.
    pub fn with_driver(driver: Box<dyn Driver>, pacing: Pacing, page: PageSelectors) -> Self {
        Self { driver, pacing, page, closed: false }
    }

    pub fn driver(&self) -> &dyn Driver {
        self.driver.as_ref()
    }

    pub fn pacing(&self) -> &Pacing {
        &self.pacing
    }

    /// Load `url`, then wait `settle_ms` for client-side rendering.
    pub fn navigate(&self, url: &str, settle_ms: u64) -> Result<(), DriverError> {
        logd!("Session: goto {}", url);
        self.driver.goto(url)?;
        pause(settle_ms);
        Ok(())
    }

    /// Dismiss the consent dialog and make sure the reviews sub-view is showing.
    pub fn prepare_reviews_view(&self) -> bool {
        let consent = self.accept_consent();
        let reviews = self.ensure_reviews_view();
        logd!("Session: consent dismissed={} reviews view={}", consent, reviews);
        reviews
    }

    /// Click the first consent button that becomes clickable in time.
    pub fn accept_consent(&self) -> bool {
        for locator in &self.page.consent_buttons {
            if let Some(button) = self.wait_clickable(locator) {
                if self.driver.click(&button).is_ok() {
                    pause(self.pacing.consent_settle_ms);
                    return true;
                }
            }
        }
        false
    }

    /// Already showing reviews → nothing to do. Else try the tab buttons, then
    /// a script that clicks anything that looks like a reviews button.
    pub fn ensure_reviews_view(&self) -> bool {
        pause(self.pacing.tab_check_ms);

        if self.driver.find_all(&self.page.reviews_present).is_ok_and(|found| !found.is_empty()) {
            return true;
        }

        for locator in &self.page.review_tabs {
            if let Some(button) = self.wait_clickable(locator) {
                if self.driver.click(&button).is_ok() {
                    pause(self.pacing.tab_settle_ms);
                    return true;
                }
            }
        }

        let clicked = self.driver.execute(REVIEWS_TAB_SCRIPT, Vec::new());
        pause(self.pacing.tab_settle_ms);
        matches!(clicked, Ok(Value::Bool(true)))
    }

    /// Scroll until lazy-loaded content stops growing or the budget runs out.
    ///
    /// Scrolls the first matching container from the configured list (budget
    /// `scroll_attempts_container`), else the window (`scroll_attempts_window`).
    pub fn load_all_content(&self) -> ScrollOutcome {
        let container = self.find_first(&self.page.scroll_containers);
        let (target, scope, budget) = match &container {
            Some(el) => (ScrollTarget::Element(el), ScrollScope::Container, self.pacing.scroll_attempts_container),
            None => (ScrollTarget::Window, ScrollScope::Window, self.pacing.scroll_attempts_window),
        };

        let mut last = self.driver.scroll_height(target).unwrap_or(0);
        let mut scrolls = 0;
        let mut settled = false;

        while scrolls < budget {
            let _ = self.driver.scroll_to_bottom(target);
            scrolls += 1;
            pause(self.pacing.scroll_delay_ms);

            let height = self.driver.scroll_height(target).unwrap_or(last);
            if height == last {
                settled = true;
                break;
            }
            last = height;
        }

        pause(self.pacing.scroll_settle_ms);
        logd!("Session: scrolled {:?} x{} (settled={}, height={})", scope, scrolls, settled, last);
        ScrollOutcome { scope, scrolls, settled }
    }

    /// Poll for a displayed + enabled match of `locator` until the wait timeout.
    /// One lookup is always made, even with a zero timeout.
    pub fn wait_clickable(&self, locator: &Locator) -> Option<ElementRef> {
        let deadline = Instant::now() + self.pacing.wait_timeout();
        loop {
            if let Ok(found) = self.driver.find_all(locator) {
                for el in found {
                    if self.driver.is_clickable(&el).unwrap_or(false) {
                        return Some(el);
                    }
                }
            }
            if Instant::now() >= deadline {
                return None;
            }
            std::thread::sleep(self.pacing.poll_interval().min(deadline.saturating_duration_since(Instant::now())));
        }
    }

    /// First element of the first locator that matches anything.
    pub fn find_first(&self, locators: &[Locator]) -> Option<ElementRef> {
        locators
            .iter()
            .find_map(|loc| self.driver.find_all(loc).ok().and_then(|v| v.into_iter().next()))
    }

    /// All matches of the first locator that matches anything; empty if none do.
    pub fn find_all_first_match(&self, locators: &[Locator]) -> Vec<ElementRef> {
        locators
            .iter()
            .map(|loc| self.driver.find_all(loc).unwrap_or_default())
            .find(|found| !found.is_empty())
            .unwrap_or_default()
    }

    /// Quit the browser. Idempotent; also runs on drop.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        match self.driver.quit() {
            Ok(()) => logd!("Session: closed"),
            Err(e) => logw!("Session: quit failed: {}", e),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
