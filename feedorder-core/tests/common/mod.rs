#![allow(dead_code)]

use std::sync::{Mutex, OnceLock};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::DateTime;
use feedorder_common::observability::{LogConfig, LogFormat};
use feedorder_core::ListingDriver;

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "feedorder-tests",
            emit_stderr: true,
            format: if std::env::var("FEEDORDER_LOG_FORMAT")
                .map(|raw| raw.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false)
            {
                LogFormat::Json
            } else {
                LogFormat::Text
            },
            default_filter: "debug".to_string(),
            log_dir: Some(std::env::temp_dir().join("feedorder-tests")),
        };

        feedorder_common::observability::init_logging(config).unwrap_or_default()
    });
}

/// Label in the listing's wire format for a given epoch value.
pub fn label(ts: i64) -> String {
    let iso = DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_else(|| "1970-01-01T00:00:00".to_string());
    format!("{iso} {ts}")
}

/// Pages of labels built from epoch values.
pub fn pages_of(pages: &[&[i64]]) -> Vec<Vec<Option<String>>> {
    pages
        .iter()
        .map(|page| page.iter().map(|ts| Some(label(*ts))).collect())
        .collect()
}

/// `total` strictly decreasing timestamps split into pages of `per_page`.
pub fn descending_pages(total: usize, per_page: usize) -> Vec<Vec<Option<String>>> {
    let stamps: Vec<i64> = (0..total as i64).map(|i| 1_742_483_184 - i * 60).collect();
    stamps
        .chunks(per_page)
        .map(|chunk| chunk.iter().map(|ts| Some(label(*ts))).collect())
        .collect()
}

pub struct FakeEntry {
    title: Option<String>,
}

#[derive(Default)]
struct State {
    page: usize,
    navigations: Vec<String>,
    settles: usize,
    advances: usize,
}

/// In-memory paginated listing.
pub struct FakeListing {
    base_url: String,
    pages: Vec<Vec<Option<String>>>,
    advance_selector: String,
    fail_on_advance: Option<usize>,
    fail_current_url: bool,
    state: Mutex<State>,
}

impl FakeListing {
    pub const BASE_URL: &'static str = "https://listing.test/newest";

    pub fn new(pages: Vec<Vec<Option<String>>>) -> Self {
        Self {
            base_url: Self::BASE_URL.to_string(),
            pages,
            advance_selector: "a.morelink".to_string(),
            fail_on_advance: None,
            fail_current_url: false,
            state: Mutex::new(State::default()),
        }
    }

    /// Make the n-th advance (1-based) fail at the driver level.
    pub fn failing_on_advance(mut self, n: usize) -> Self {
        self.fail_on_advance = Some(n);
        self
    }

    /// Make every `current_url` call fail at the driver level.
    pub fn failing_current_url(mut self) -> Self {
        self.fail_current_url = true;
        self
    }

    pub fn advances(&self) -> usize {
        self.state.lock().unwrap().advances
    }

    pub fn settles(&self) -> usize {
        self.state.lock().unwrap().settles
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    fn url_for(&self, page: usize) -> String {
        if page == 0 {
            self.base_url.clone()
        } else {
            format!("{}?p={}", self.base_url, page + 1)
        }
    }
}

#[async_trait]
impl ListingDriver for FakeListing {
    type Element = FakeEntry;

    async fn navigate(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.page = 0;
        state.navigations.push(url.to_string());
        Ok(())
    }

    async fn wait_for_settled(&self) -> Result<()> {
        self.state.lock().unwrap().settles += 1;
        Ok(())
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<FakeEntry>> {
        if selector != "span.age" {
            return Ok(Vec::new());
        }
        let page = self.state.lock().unwrap().page;
        Ok(self
            .pages
            .get(page)
            .map(|entries| {
                entries
                    .iter()
                    .map(|title| FakeEntry {
                        title: title.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_attribute(&self, element: &FakeEntry, name: &str) -> Result<Option<String>> {
        Ok(match name {
            "title" => element.title.clone(),
            _ => None,
        })
    }

    async fn advance_page(&self, selector: &str) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        state.advances += 1;
        if self.fail_on_advance == Some(state.advances) {
            return Err(anyhow!("session closed while clicking {selector}"));
        }
        if selector != self.advance_selector || state.page + 1 >= self.pages.len() {
            return Ok(false);
        }
        state.page += 1;
        state.settles += 1;
        Ok(true)
    }

    async fn current_url(&self) -> Result<String> {
        if self.fail_current_url {
            return Err(anyhow!("no browsing context"));
        }
        let page = self.state.lock().unwrap().page;
        Ok(self.url_for(page))
    }
}
