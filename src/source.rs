//! Cache-first retrieval of documentation pages, the gallery index and notebooks.
//!
//! Every lookup follows the same shape: serve a fresh cache entry if there is one,
//! otherwise fetch, transform, write the result back and return it. A failed fetch
//! returns the error and leaves whatever was cached untouched.

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::FetchError;
use crate::fetch::Fetch;
use crate::gallery::{Example, parse_gallery};
use crate::html::html_to_doc_markdown;
use crate::notebook::extract_notebook_code;
use std::path::Path;

/// Upstream endpoints used by a [`DocSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub docs_base_url: String,
    pub gallery_url: String,
    pub notebook_api_url: String,
    pub notebook_base_url: String,
}

impl From<&Config> for Endpoints {
    fn from(config: &Config) -> Self {
        Self {
            docs_base_url: config.docs_base_url.clone(),
            gallery_url: config.gallery_url.clone(),
            notebook_api_url: config.notebook_api_url.clone(),
            notebook_base_url: config.notebook_base_url.clone(),
        }
    }
}

/// Owns the cache and the fetcher; shared by every tool handler.
#[derive(Debug)]
pub struct DocSource<F> {
    cache: CacheStore,
    fetcher: F,
    endpoints: Endpoints,
}

impl<F: Fetch> DocSource<F> {
    pub const fn new(cache: CacheStore, fetcher: F, endpoints: Endpoints) -> Self {
        Self {
            cache,
            fetcher,
            endpoints,
        }
    }

    /// Build from a loaded [`Config`].
    pub fn from_config(config: &Config, fetcher: F) -> Self {
        Self::new(
            CacheStore::new(&config.cache_dir, config.ttl),
            fetcher,
            Endpoints::from(config),
        )
    }

    pub const fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// A documentation page such as `/d3-scale/linear`, reduced to markdown.
    pub async fn fetch_page(&self, page: &str) -> Result<String, FetchError> {
        let path = self.cache.path_for(page).ok_or_else(|| FetchError::InvalidPath {
            path: page.to_string(),
        })?;
        if let Some(content) = self.cache.read_fresh(&path).await {
            tracing::debug!("Cache hit for {}", page);
            return Ok(content);
        }

        let url = format!("{}{}", self.endpoints.docs_base_url, page);
        let html = self.get(&url, "Page").await?;

        let content = html_to_doc_markdown(&html);
        self.store(&path, page, &content).await;
        Ok(content)
    }

    /// Every example listed on the gallery page.
    ///
    /// The parsed list is cached as JSON; a cache file that fails to parse is
    /// treated as missing.
    pub async fn fetch_gallery(&self) -> Result<Vec<Example>, FetchError> {
        let path = self.cache.gallery_path();
        if let Some(cached) = self.cache.read_fresh(&path).await {
            match serde_json::from_str::<Vec<Example>>(&cached) {
                Ok(examples) => {
                    tracing::debug!("Cache hit for gallery ({} examples)", examples.len());
                    return Ok(examples);
                }
                Err(e) => tracing::warn!("Discarding unparseable gallery cache: {}", e),
            }
        }

        let url = &self.endpoints.gallery_url;
        let page = self.get(url, "Gallery").await?;

        let examples = parse_gallery(&page);
        if examples.is_empty() {
            return Err(FetchError::EmptyGallery { url: url.clone() });
        }

        match serde_json::to_string(&examples) {
            Ok(json) => self.store(&path, "gallery", &json).await,
            Err(e) => tracing::warn!("Failed to serialize gallery: {}", e),
        }
        Ok(examples)
    }

    /// Readable source of a notebook such as `@d3/bar-chart/2`.
    pub async fn fetch_notebook(&self, notebook: &str) -> Result<String, FetchError> {
        let path = self.cache.notebook_path_for(notebook).ok_or_else(|| {
            FetchError::InvalidPath {
                path: notebook.to_string(),
            }
        })?;
        if let Some(content) = self.cache.read_fresh(&path).await {
            tracing::debug!("Cache hit for {}", notebook);
            return Ok(content);
        }

        let url = format!("{}/{}.js?v=4", self.endpoints.notebook_api_url, notebook);
        let source = self.get(&url, "Notebook").await?;

        let content = extract_notebook_code(&source, &self.endpoints.notebook_base_url);
        self.store(&path, notebook, &content).await;
        Ok(content)
    }

    async fn get(&self, url: &str, what: &'static str) -> Result<String, FetchError> {
        self.fetcher.get(url).await.map_err(|e| {
            let e = e.describe(what);
            tracing::warn!("{}", e);
            e
        })
    }

    /// Write-back is best effort; the caller already has the content.
    async fn store(&self, path: &Path, key: &str, content: &str) {
        match self.cache.write(path, content).await {
            Ok(()) => tracing::info!("Cached {} ({} bytes)", key, content.len()),
            Err(e) => tracing::warn!("Failed to cache {}: {:#}", key, e),
        }
    }
}
