// src/browser/webdriver.rs
//
// W3C WebDriver client over blocking HTTP (chromedriver, geckodriver, selenium).
// Only the endpoints the collector uses.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{Driver, DriverError, ElementRef, Locator, ScrollTarget};
use crate::config::BrowserOptions;

/// W3C element reference key.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735a6f1ebc";

// HTTP timeout on top of the page-load timeout, so the driver times out first.
const HTTP_SLACK: Duration = Duration::from_secs(30);

pub struct WebDriver {
    http: Client,
    base: String,
    session_id: String,
}

#[derive(Deserialize)]
struct NewSession {
    #[serde(rename = "sessionId")]
    session_id: String,
}

#[derive(Deserialize)]
struct WireError {
    error: String,
    #[serde(default)]
    message: String,
}

impl WebDriver {
    /// Start a new browser session on the WebDriver server at `opts.webdriver_url`.
    pub fn connect(opts: &BrowserOptions) -> Result<Self, DriverError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(opts.page_load_timeout_ms) + HTTP_SLACK)
            .build()?;
        let base = opts.webdriver_url.trim_end_matches('/').to_string();

        let resp = http
            .post(format!("{base}/session"))
            .json(&json!({ "capabilities": { "alwaysMatch": capabilities(opts) } }))
            .send()?;
        let value = unwrap_response(resp)?;
        let NewSession { session_id } = serde_json::from_value(value)
            .map_err(|e| DriverError::UnexpectedResponse(format!("new session: {e}")))?;

        let driver = Self { http, base, session_id };
        // implicit 0: lookups answer immediately, waiting is done by explicit polls
        let timeouts = json!({ "pageLoad": opts.page_load_timeout_ms, "implicit": 0 });
        if let Err(e) = driver.post("/timeouts", timeouts) {
            if let Err(quit) = driver.quit() {
                logw!("WebDriver: could not end session {}: {}", driver.session_id, quit);
            }
            return Err(e);
        }
        logf!("WebDriver: session {} on {}", driver.session_id, driver.base);
        Ok(driver)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/session/{}{}", self.base, self.session_id, path)
    }

    fn get(&self, path: &str) -> Result<Value, DriverError> {
        unwrap_response(self.http.get(self.url(path)).send()?)
    }

    fn post(&self, path: &str, body: Value) -> Result<Value, DriverError> {
        unwrap_response(self.http.post(self.url(path)).json(&body).send()?)
    }

    fn elements(&self, path: &str, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        let value = self.post(path, json!({ "using": locator.strategy(), "value": locator.value() }))?;
        match value {
            Value::Array(items) => items.iter().map(element_from).collect(),
            other => Err(DriverError::UnexpectedResponse(format!("elements: {other}"))),
        }
    }

    fn element_path(element: &ElementRef, tail: &str) -> String {
        format!("/element/{}{}", element.0, tail)
    }
}

fn capabilities(opts: &BrowserOptions) -> Value {
    let mut args = vec![
        s!("--no-sandbox"),
        s!("--disable-dev-shm-usage"),
        s!("--disable-gpu"),
        s!("--disable-extensions"),
        s!("--disable-notifications"),
        format!("--user-agent={}", opts.user_agent),
    ];
    if opts.headless {
        args.push(s!("--headless=new"));
    }
    let mut prefs = json!({ "profile.default_content_setting_values.notifications": 2 });
    if opts.block_images {
        prefs["profile.managed_default_content_settings.images"] = json!(2);
    }
    json!({
        "browserName": "chrome",
        "goog:chromeOptions": {
            "args": args,
            "excludeSwitches": ["enable-automation", "enable-logging"],
            "prefs": prefs,
        }
    })
}

fn element_arg(element: &ElementRef) -> Value {
    json!({ ELEMENT_KEY: element.0 })
}

fn element_from(v: &Value) -> Result<ElementRef, DriverError> {
    v.get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(|id| ElementRef(s!(id)))
        .ok_or_else(|| DriverError::UnexpectedResponse(format!("element reference: {v}")))
}

/// Pull `value` out of a WebDriver reply; map error payloads to `DriverError`.
fn unwrap_response(resp: Response) -> Result<Value, DriverError> {
    let status = resp.status();
    let mut body: Value = resp.json()?;
    let value = body.get_mut("value").map(Value::take).unwrap_or(Value::Null);
    if status.is_success() {
        return Ok(value);
    }
    match serde_json::from_value::<WireError>(value) {
        Ok(err) => Err(map_wire_error(err)),
        Err(_) => Err(DriverError::UnexpectedResponse(format!("HTTP {status}"))),
    }
}

fn map_wire_error(err: WireError) -> DriverError {
    match err.error.as_str() {
        "no such element" => DriverError::NoSuchElement(err.message),
        "stale element reference" => DriverError::StaleElement,
        "invalid session id" => DriverError::InvalidSession,
        "timeout" | "script timeout" => DriverError::Timeout(err.message),
        _ => DriverError::WebDriver { error: err.error, message: err.message },
    }
}

impl Driver for WebDriver {
    fn goto(&self, url: &str) -> Result<(), DriverError> {
        self.post("/url", json!({ "url": url })).map(|_| ())
    }

    fn find_all(&self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        self.elements("/elements", locator)
    }

    fn find_all_in(&self, parent: &ElementRef, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        self.elements(&Self::element_path(parent, "/elements"), locator)
    }

    fn text(&self, element: &ElementRef) -> Result<String, DriverError> {
        match self.get(&Self::element_path(element, "/text"))? {
            Value::String(s) => Ok(s),
            Value::Null => Ok(s!()),
            other => Err(DriverError::UnexpectedResponse(format!("text: {other}"))),
        }
    }

    fn attribute(&self, element: &ElementRef, name: &str) -> Result<Option<String>, DriverError> {
        match self.get(&Self::element_path(element, &format!("/attribute/{name}")))? {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Ok(Some(other.to_string())),
        }
    }

    fn is_clickable(&self, element: &ElementRef) -> Result<bool, DriverError> {
        let displayed = self.get(&Self::element_path(element, "/displayed"))?;
        if displayed != Value::Bool(true) {
            return Ok(false);
        }
        let enabled = self.get(&Self::element_path(element, "/enabled"))?;
        Ok(enabled == Value::Bool(true))
    }

    fn click(&self, element: &ElementRef) -> Result<(), DriverError> {
        self.post(&Self::element_path(element, "/click"), json!({})).map(|_| ())
    }

    fn script_click(&self, element: &ElementRef) -> Result<(), DriverError> {
        self.execute("arguments[0].click();", vec![element_arg(element)]).map(|_| ())
    }

    fn scroll_height(&self, target: ScrollTarget<'_>) -> Result<i64, DriverError> {
        let value = match target {
            ScrollTarget::Element(el) => {
                self.execute("return arguments[0].scrollHeight;", vec![element_arg(el)])?
            }
            ScrollTarget::Window => self.execute("return document.body.scrollHeight;", vec![])?,
        };
        value
            .as_f64()
            .map(|h| h as i64)
            .ok_or_else(|| DriverError::UnexpectedResponse(format!("scrollHeight: {value}")))
    }

    fn scroll_to_bottom(&self, target: ScrollTarget<'_>) -> Result<(), DriverError> {
        match target {
            ScrollTarget::Element(el) => self.execute(
                "arguments[0].scrollTop = arguments[0].scrollHeight;",
                vec![element_arg(el)],
            ),
            ScrollTarget::Window => {
                self.execute("window.scrollTo(0, document.body.scrollHeight);", vec![])
            }
        }
        .map(|_| ())
    }

    fn execute(&self, script: &str, args: Vec<Value>) -> Result<Value, DriverError> {
        self.post("/execute/sync", json!({ "script": script, "args": args }))
    }

    fn quit(&self) -> Result<(), DriverError> {
        let resp = self.http.delete(self.url("")).send()?;
        unwrap_response(resp).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answers one request per entry of `replies`, in order, closing the
    /// connection each time. Joins to the "METHOD path" lines it saw.
    fn stub_server(replies: Vec<(u16, Value)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let mut seen = Vec::new();
            for (status, body) in replies {
                let (mut stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request = s!();
                reader.read_line(&mut request).unwrap();
                let mut len = 0;
                loop {
                    let mut header = s!();
                    reader.read_line(&mut header).unwrap();
                    if header.trim().is_empty() {
                        break;
                    }
                    if let Some(v) = header.to_ascii_lowercase().strip_prefix("content-length:") {
                        len = v.trim().parse().unwrap();
                    }
                }
                let mut payload = vec![0; len];
                reader.read_exact(&mut payload).unwrap();
                seen.push(request.split_whitespace().take(2).collect::<Vec<_>>().join(" "));

                let body = body.to_string();
                write!(
                    stream,
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                )
                .unwrap();
            }
            seen
        });
        (base, handle)
    }

    #[test]
    fn failed_timeouts_end_the_new_session() {
        let (base, server) = stub_server(vec![
            (200, json!({ "value": { "sessionId": "s1", "capabilities": {} } })),
            (400, json!({ "value": { "error": "invalid argument", "message": "bad timeouts" } })),
            (200, json!({ "value": null })),
        ]);
        let mut opts = BrowserOptions::default();
        opts.webdriver_url = base;

        let err = WebDriver::connect(&opts).err().unwrap();
        assert!(matches!(err, DriverError::WebDriver { .. }));
        assert_eq!(server.join().unwrap(), ["POST /session", "POST /session/s1/timeouts", "DELETE /session/s1"]);
    }

    #[test]
    fn wire_errors_map_to_variants() {
        let err = |code: &str| WireError { error: s!(code), message: s!("m") };
        assert!(matches!(map_wire_error(err("no such element")), DriverError::NoSuchElement(_)));
        assert!(matches!(map_wire_error(err("invalid session id")), DriverError::InvalidSession));
        assert!(matches!(map_wire_error(err("stale element reference")), DriverError::StaleElement));
        assert!(matches!(
            map_wire_error(err("element click intercepted")),
            DriverError::WebDriver { .. }
        ));
    }

    #[test]
    fn element_reference_round_trip() {
        let el = ElementRef(s!("abc-123"));
        assert_eq!(element_from(&element_arg(&el)).unwrap(), el);
        assert!(element_from(&json!({ "ELEMENT": "legacy" })).is_err());
    }

    #[test]
    fn headless_and_images_flags() {
        let mut opts = BrowserOptions::default();
        opts.headless = true;
        opts.block_images = false;
        let caps = capabilities(&opts);
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.iter().any(|a| a == "--headless=new"));
        assert!(caps["goog:chromeOptions"]["prefs"]
            .get("profile.managed_default_content_settings.images")
            .is_none());
    }
}
