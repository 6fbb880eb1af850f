//! Drift report between the static registry and the live d3js.org sidebar.

use crate::error::Result;
use crate::fetch::Fetch;
use crate::registry::ModuleRecord;
use anyhow::{Context, bail};
use scraper::{Html, Selector};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::LazyLock;

static SIDEBAR_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("nav#VPSidebarNav a[href]").unwrap());
static SIDEBAR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("nav#VPSidebarNav").unwrap());

/// Module name → page paths (index page first), as listed on the live site.
pub type LiveRegistry = BTreeMap<String, Vec<String>>;

/// Download the API index page and parse its sidebar.
pub async fn fetch_live_registry<F: Fetch>(
    fetcher: &F,
    docs_base_url: &str,
) -> Result<LiveRegistry> {
    let url = format!("{}/api", docs_base_url);
    let html = fetcher
        .get(&url)
        .await
        .with_context(|| format!("Failed to fetch live registry from {}", url))?;
    parse_live_registry(&html)
}

/// Walk the sidebar links in order. A `/d3-name` link opens a module; deeper links
/// under the module currently open are its pages. Anything else is ignored.
pub fn parse_live_registry(html: &str) -> Result<LiveRegistry> {
    let document = Html::parse_document(html);
    if document.select(&SIDEBAR).next().is_none() {
        bail!("Could not find sidebar nav on the API index page");
    }

    let mut modules = LiveRegistry::new();
    let mut current: Option<String> = None;

    for link in document.select(&SIDEBAR_LINKS) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if !href.starts_with("/d3-") {
            continue;
        }

        let segments: Vec<&str> = href.trim_matches('/').split('/').collect();
        let module = segments[0];

        if segments.len() == 1 {
            current = Some(module.to_string());
            modules.insert(module.to_string(), vec![href.to_string()]);
        } else if current.as_deref() == Some(module)
            && let Some(pages) = modules.get_mut(module)
        {
            pages.push(href.to_string());
        }
    }

    Ok(modules)
}

/// Differences between the live site and the static registry, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriftReport {
    /// `"name (page, page)"` for modules only on the live site
    pub added_modules: Vec<String>,
    /// Modules only in the registry
    pub removed_modules: Vec<String>,
    /// `"name: page"` for pages only on the live site
    pub added_pages: Vec<String>,
    /// `"name: page"` for pages only in the registry
    pub removed_pages: Vec<String>,
}

impl DriftReport {
    pub fn total(&self) -> usize {
        self.added_modules.len()
            + self.removed_modules.len()
            + self.added_pages.len()
            + self.removed_pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    fn sections(&self) -> [(&'static str, &[String]); 4] {
        [
            ("New modules on d3js.org (not in registry)", self.added_modules.as_slice()),
            ("Modules in registry but gone from d3js.org", self.removed_modules.as_slice()),
            ("New pages on d3js.org (not in registry)", self.added_pages.as_slice()),
            ("Pages in registry but gone from d3js.org", self.removed_pages.as_slice()),
        ]
    }
}

impl fmt::Display for DriftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No drift detected. Registry is up to date.");
        }

        writeln!(f, "Found {} difference(s):", self.total())?;
        for (label, items) in self.sections() {
            if items.is_empty() {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "  {}:", label)?;
            for item in items {
                writeln!(f, "    - {}", item)?;
            }
        }
        Ok(())
    }
}

/// Compare a parsed live registry against local records.
pub fn diff_registry(live: &LiveRegistry, local: &[ModuleRecord]) -> DriftReport {
    let local_map: BTreeMap<&str, &ModuleRecord> = local.iter().map(|m| (m.name, m)).collect();
    let local_names: BTreeSet<&str> = local_map.keys().copied().collect();
    let live_names: BTreeSet<&str> = live.keys().map(String::as_str).collect();

    let mut report = DriftReport::default();

    for name in live_names.difference(&local_names) {
        report
            .added_modules
            .push(format!("{} ({})", name, live[*name].join(", ")));
    }

    for name in local_names.difference(&live_names) {
        report.removed_modules.push((*name).to_string());
    }

    for name in local_names.intersection(&live_names) {
        let local_pages: BTreeSet<&str> = local_map[name].pages.iter().copied().collect();
        let live_pages: BTreeSet<&str> = live[*name].iter().map(String::as_str).collect();

        for page in live_pages.difference(&local_pages) {
            report.added_pages.push(format!("{}: {}", name, page));
        }
        for page in local_pages.difference(&live_pages) {
            report.removed_pages.push(format!("{}: {}", name, page));
        }
    }

    report
}
