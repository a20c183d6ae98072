// tests/common/mod.rs
//
// In-memory browser for session/extractor tests. Pages are keyed by URL; each
// page maps locator values to element ids, document-wide or under a parent.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::rc::Rc;

use serde_json::Value;
use tempfile::TempDir;

use gym_reviews::browser::{Driver, DriverError, ElementRef, Locator, ScrollTarget, Session};
use gym_reviews::config::selectors::PageSelectors;
use gym_reviews::config::Pacing;

pub fn el(id: &str) -> ElementRef {
    ElementRef(id.to_string())
}

#[derive(Default)]
pub struct FakePage {
    doc: HashMap<String, Vec<ElementRef>>,
    children: HashMap<(ElementRef, String), Vec<ElementRef>>,
    text: HashMap<ElementRef, String>,
    attrs: HashMap<(ElementRef, String), String>,
    clickable: HashSet<ElementRef>,
    /// Every lookup under these finds nothing.
    broken: HashSet<ElementRef>,
    /// Any call touching these fails with a stale reference.
    stale: HashSet<ElementRef>,
    /// Any call touching these reports a lost session.
    dead: HashSet<ElementRef>,
    pub height: i64,
    /// Added to `height` on every scroll; 0 = fully loaded.
    pub growth: i64,
    /// What `execute` returns for non-scroll scripts.
    pub script_result: Value,
}

impl FakePage {
    pub fn new() -> Self {
        Self { height: 1000, script_result: Value::Null, ..Self::default() }
    }

    /// Document-level matches for `locator`.
    pub fn add(&mut self, locator: &Locator, ids: &[&str]) -> &mut Self {
        self.doc.entry(locator.value().to_string()).or_default().extend(ids.iter().map(|id| el(id)));
        self
    }

    /// A child of `parent` matched by `locator`, with its text.
    pub fn child(&mut self, parent: &str, locator: &Locator, id: &str, text: &str) -> &mut Self {
        self.children
            .entry((el(parent), locator.value().to_string()))
            .or_default()
            .push(el(id));
        self.text.insert(el(id), text.to_string());
        self
    }

    pub fn attr(&mut self, id: &str, name: &str, value: &str) -> &mut Self {
        self.attrs.insert((el(id), name.to_string()), value.to_string());
        self
    }

    pub fn clickable(&mut self, id: &str) -> &mut Self {
        self.clickable.insert(el(id));
        self
    }

    pub fn broken(&mut self, id: &str) -> &mut Self {
        self.broken.insert(el(id));
        self
    }

    pub fn stale(&mut self, id: &str) -> &mut Self {
        self.stale.insert(el(id));
        self
    }

    pub fn dead(&mut self, id: &str) -> &mut Self {
        self.dead.insert(el(id));
        self
    }
}

#[derive(Default)]
pub struct FakeState {
    pub pages: HashMap<String, FakePage>,
    pub current: String,
    /// Navigation to these fails.
    pub unreachable: HashSet<String>,
    /// "goto <url>", "click <id>", "script_click <id>", "execute", "scroll", "quit"
    pub events: Vec<String>,
}

impl FakeState {
    fn page(&mut self) -> &mut FakePage {
        let key = self.current.clone();
        self.pages.entry(key).or_insert_with(FakePage::new)
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events.iter().filter(|e| e.starts_with(prefix)).count()
    }
}

#[derive(Clone, Default)]
pub struct FakeDriver {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeDriver {
    /// Driver already sitting on `page` (no navigation needed).
    pub fn on(page: FakePage) -> Self {
        let d = FakeDriver::default();
        d.state.borrow_mut().pages.insert(String::new(), page);
        d
    }

    pub fn with_pages(pages: Vec<(&str, FakePage)>) -> Self {
        let d = FakeDriver::default();
        {
            let mut st = d.state.borrow_mut();
            for (url, page) in pages {
                st.pages.insert(url.to_string(), page);
            }
        }
        d
    }

    pub fn session(&self) -> Session {
        Session::with_driver(Box::new(self.clone()), Pacing::none(), PageSelectors::default())
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.state.borrow().count(prefix)
    }

    fn check(&self, element: &ElementRef) -> Result<(), DriverError> {
        let mut st = self.state.borrow_mut();
        let page = st.page();
        if page.dead.contains(element) {
            return Err(DriverError::InvalidSession);
        }
        if page.stale.contains(element) {
            return Err(DriverError::StaleElement);
        }
        Ok(())
    }
}

impl Driver for FakeDriver {
    fn goto(&self, url: &str) -> Result<(), DriverError> {
        let mut st = self.state.borrow_mut();
        st.events.push(format!("goto {url}"));
        if st.unreachable.contains(url) {
            return Err(DriverError::WebDriver {
                error: "unknown error".to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            });
        }
        st.current = url.to_string();
        Ok(())
    }

    fn find_all(&self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        let mut st = self.state.borrow_mut();
        Ok(st.page().doc.get(locator.value()).cloned().unwrap_or_default())
    }

    fn find_all_in(&self, parent: &ElementRef, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        self.check(parent)?;
        let mut st = self.state.borrow_mut();
        let page = st.page();
        if page.broken.contains(parent) {
            return Ok(Vec::new());
        }
        let key = (parent.clone(), locator.value().to_string());
        Ok(page.children.get(&key).cloned().unwrap_or_default())
    }

    fn text(&self, element: &ElementRef) -> Result<String, DriverError> {
        self.check(element)?;
        Ok(self.state.borrow_mut().page().text.get(element).cloned().unwrap_or_default())
    }

    fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>, DriverError> {
        self.check(element)?;
        let key = (element.clone(), name.to_string());
        Ok(self.state.borrow_mut().page().attrs.get(&key).cloned())
    }

    fn is_clickable(&self, element: &ElementRef) -> Result<bool, DriverError> {
        Ok(self.state.borrow_mut().page().clickable.contains(element))
    }

    fn click(&self, element: &ElementRef) -> Result<(), DriverError> {
        let mut st = self.state.borrow_mut();
        if !st.page().clickable.contains(element) {
            return Err(DriverError::WebDriver {
                error: "element not interactable".to_string(),
                message: element.0.clone(),
            });
        }
        st.events.push(format!("click {}", element.0));
        Ok(())
    }

    fn script_click(&self, element: &ElementRef) -> Result<(), DriverError> {
        self.state.borrow_mut().events.push(format!("script_click {}", element.0));
        Ok(())
    }

    fn scroll_height(&self, _target: ScrollTarget<'_>) -> Result<i64, DriverError> {
        Ok(self.state.borrow_mut().page().height)
    }

    fn scroll_to_bottom(&self, target: ScrollTarget<'_>) -> Result<(), DriverError> {
        let mut st = self.state.borrow_mut();
        let what = match target {
            ScrollTarget::Element(e) => e.0.clone(),
            ScrollTarget::Window => "window".to_string(),
        };
        st.events.push(format!("scroll {what}"));
        let page = st.page();
        page.height += page.growth;
        Ok(())
    }

    fn execute(&self, _script: &str, _args: Vec<Value>) -> Result<Value, DriverError> {
        let mut st = self.state.borrow_mut();
        st.events.push("execute".to_string());
        Ok(st.page().script_result.clone())
    }

    fn quit(&self) -> Result<(), DriverError> {
        self.state.borrow_mut().events.push("quit".to_string());
        Ok(())
    }
}

/// Fresh temp dir plus a dataset path inside a not-yet-existing subdir.
pub fn dataset_path() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("reviews.csv");
    (dir, path)
}
