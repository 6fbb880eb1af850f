//! Runtime configuration: cache location, TTL, timeouts and upstream URLs.
//!
//! Built from defaults, then an optional TOML file, then environment overrides.

use crate::error::Result;
use anyhow::Context;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_ENV: &str = "D3_DOCS_MCP_CONFIG";
/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV: &str = "D3_DOCS_MCP_CACHE_DIR";

/// Cached entries older than this are refetched.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Budget for a single upstream request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const DOCS_BASE_URL: &str = "https://d3js.org";
pub const GALLERY_URL: &str = "https://observablehq.com/@d3/gallery";
pub const NOTEBOOK_API_URL: &str = "https://api.observablehq.com";
pub const NOTEBOOK_BASE_URL: &str = "https://observablehq.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root directory of the file cache
    pub cache_dir: PathBuf,
    /// Freshness window for cached entries
    pub ttl: Duration,
    /// Per-request timeout
    pub timeout: Duration,
    /// Base URL of the API reference site
    pub docs_base_url: String,
    /// Gallery index page
    pub gallery_url: String,
    /// Host serving compiled notebook modules
    pub notebook_api_url: String,
    /// Host used when linking to source notebooks
    pub notebook_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            ttl: DEFAULT_TTL,
            timeout: DEFAULT_TIMEOUT,
            docs_base_url: DOCS_BASE_URL.to_string(),
            gallery_url: GALLERY_URL.to_string(),
            notebook_api_url: NOTEBOOK_API_URL.to_string(),
            notebook_base_url: NOTEBOOK_BASE_URL.to_string(),
        }
    }
}

/// On-disk representation; every field is optional and falls back to the default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub cache_dir: Option<String>,
    pub ttl_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub docs_base_url: Option<String>,
    pub gallery_url: Option<String>,
    pub notebook_api_url: Option<String>,
    pub notebook_base_url: Option<String>,
}

impl Config {
    /// Load configuration from an explicit path, `D3_DOCS_MCP_CONFIG`, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(env_path) {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_toml(&text)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => Self::default(),
        };

        if let Ok(dir) = std::env::var(CACHE_DIR_ENV)
            && !dir.trim().is_empty()
        {
            config.cache_dir = PathBuf::from(expand_tilde(dir.trim()).as_ref());
        }

        Ok(config)
    }

    /// Parse a TOML document and merge it over the defaults.
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text).context("Failed to parse TOML")?;
        Ok(Self::default().merge(file))
    }

    fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(dir) = file.cache_dir {
            self.cache_dir = PathBuf::from(expand_tilde(&dir).as_ref());
        }
        if let Some(secs) = file.ttl_secs {
            self.ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(url) = file.docs_base_url {
            self.docs_base_url = trim_url(url);
        }
        if let Some(url) = file.gallery_url {
            self.gallery_url = url;
        }
        if let Some(url) = file.notebook_api_url {
            self.notebook_api_url = trim_url(url);
        }
        if let Some(url) = file.notebook_base_url {
            self.notebook_base_url = trim_url(url);
        }
        self
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
        .unwrap_or_else(std::env::temp_dir)
        .join("d3-docs-mcp")
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
