//! Shared fixtures for integration tests.
//!
//! Every test gets its own temporary cache directory and an in-memory [`FakeFetcher`]
//! that serves canned responses by URL and records every request it receives. No
//! test touches the network.
//!
//! Cache entries can be seeded directly with [`TestSource::seed_page`] and friends,
//! and aged with [`backdate`] to simulate an expired TTL.

#![allow(dead_code)] // Helpers are shared across several integration test crates

use d3_docs_mcp::{CacheStore, DocSource, Endpoints, Example, Fetch, FetchError, registry};
use rstest::fixture;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

pub const DOCS_BASE_URL: &str = "https://docs.test";
pub const GALLERY_URL: &str = "https://gallery.test/@d3/gallery";
pub const NOTEBOOK_API_URL: &str = "https://api.notebooks.test";
pub const NOTEBOOK_BASE_URL: &str = "https://notebooks.test";

pub const TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub const GALLERY_HTML: &str = include_str!("../fixtures/gallery.html");
pub const BAR_CHART_JS: &str = include_str!("../fixtures/bar_chart.js");
pub const FORCE_GRAPH_JS: &str = include_str!("../fixtures/force_graph.js");
pub const SCALE_MARKDOWN: &str = include_str!("../fixtures/scale.md");

/// URL a notebook path is fetched from.
pub fn notebook_url(path: &str) -> String {
    format!("{}/{}.js?v=4", NOTEBOOK_API_URL, path)
}

/// URL a documentation page is fetched from.
pub fn page_url(page: &str) -> String {
    format!("{}{}", DOCS_BASE_URL, page)
}

/// Minimal docs-site HTML wrapping `body` in the main content container.
pub fn docs_html(body: &str) -> String {
    format!(
        "<html><head><script>var x = 1;</script></head><body>\
         <nav>Site navigation</nav><main class=\"main\">{}</main></body></html>",
        body
    )
}

/// In-memory [`Fetch`] implementation.
///
/// Unknown URLs answer with [`FetchError::NotFound`].
#[derive(Debug, Default)]
pub struct FakeFetcher {
    responses: Mutex<HashMap<String, Result<String, FetchError>>>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `body` from now on.
    pub fn respond(&self, url: impl Into<String>, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.into(), Ok(body.into()));
    }

    /// Answer `url` with `error` from now on.
    pub fn fail(&self, url: impl Into<String>, error: FetchError) {
        self.responses.lock().unwrap().insert(url.into(), Err(error));
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Fetch for FakeFetcher {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::NotFound {
                    what: "Resource",
                    url: url.to_string(),
                })
            })
    }
}

/// A [`DocSource`] over a private temp cache and a [`FakeFetcher`].
pub struct TestSource {
    _temp: TempDir,
    pub source: DocSource<FakeFetcher>,
}

impl TestSource {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let endpoints = Endpoints {
            docs_base_url: DOCS_BASE_URL.to_string(),
            gallery_url: GALLERY_URL.to_string(),
            notebook_api_url: NOTEBOOK_API_URL.to_string(),
            notebook_base_url: NOTEBOOK_BASE_URL.to_string(),
        };
        let cache = CacheStore::new(temp.path(), TTL);
        let source = DocSource::new(cache, FakeFetcher::new(), endpoints);
        Self {
            _temp: temp,
            source,
        }
    }

    pub fn fetcher(&self) -> &FakeFetcher {
        self.source.fetcher()
    }

    pub fn cache(&self) -> &CacheStore {
        self.source.cache()
    }

    pub fn root(&self) -> &Path {
        self.cache().root()
    }

    /// Write a fresh cache entry for a documentation page.
    pub fn seed_page(&self, page: &str, markdown: &str) -> PathBuf {
        let path = self.cache().path_for(page).expect("page key is valid");
        write_file(&path, markdown);
        path
    }

    /// Write a fresh cache entry for a notebook.
    pub fn seed_notebook(&self, notebook: &str, content: &str) -> PathBuf {
        let path = self.cache().notebook_path_for(notebook).expect("notebook key is valid");
        write_file(&path, content);
        path
    }

    /// Fresh entries for every page of `module`, all with the same content.
    pub fn seed_module(&self, module: &str, markdown: &str) {
        let record = registry::module(module).expect("module is in the registry");
        for page in record.pages {
            self.seed_page(page, markdown);
        }
    }

    /// Fresh entries for every page in the registry.
    pub fn seed_all_pages(&self, markdown: &str) {
        for record in registry::MODULES {
            self.seed_module(record.name, markdown);
        }
    }

    /// Fresh gallery entry holding `examples`.
    pub fn seed_examples(&self, examples: &[Example]) -> PathBuf {
        let json = serde_json::to_string(examples).expect("examples serialize");
        self.seed_gallery(&json)
    }

    /// Write a raw gallery cache file.
    pub fn seed_gallery(&self, json: &str) -> PathBuf {
        let path = self.cache().gallery_path();
        write_file(&path, json);
        path
    }
}

fn write_file(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().expect("cache entry has a parent"))
        .expect("Failed to create cache directory");
    std::fs::write(path, content).expect("Failed to write cache entry");
}

/// Move a file's modification time `age` into the past.
pub fn backdate(path: &Path, age: Duration) {
    let file = std::fs::File::options()
        .write(true)
        .open(path)
        .expect("Failed to open file for backdating");
    file.set_modified(SystemTime::now() - age)
        .expect("Failed to set modification time");
}

pub fn example(path: &str, title: &str, category: &str, author: &str) -> Example {
    Example {
        path: path.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        author: author.to_string(),
    }
}

/// Fresh source for each test.
#[fixture]
pub fn test_source() -> TestSource {
    TestSource::new()
}
