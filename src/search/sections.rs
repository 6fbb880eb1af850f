//! Splitting a documentation page into searchable sections.

use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{2,3})\s+(.+)").unwrap());

/// Inline anchors used to mark individual API methods, e.g.
/// `<a name="scaleLinear" href="#scaleLinear">#</a>`.
static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s+(?:[^>]*?\s+)?(?:name|id)\s*=\s*["']([^"']+)["']"#).unwrap()
});

/// A run of text under one heading or anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    /// The triggering line plus everything up to the next trigger, trimmed
    pub content: String,
}

/// Split markdown at `##`/`###` headings and at `<a name|id=...>` anchors.
///
/// Text before the first trigger is dropped, so a page with neither yields no
/// sections.
pub fn parse_sections(markdown: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in markdown.split('\n') {
        let heading = HEADING
            .captures(line)
            .map(|caps| caps[2].trim().to_string())
            .or_else(|| ANCHOR.captures(line).map(|caps| caps[1].trim().to_string()));

        match heading {
            Some(heading) => {
                if let Some((prev, lines)) = current.take() {
                    sections.push(close(prev, &lines));
                }
                current = Some((heading, vec![line]));
            }
            None => {
                if let Some((_, lines)) = current.as_mut() {
                    lines.push(line);
                }
            }
        }
    }

    if let Some((heading, lines)) = current {
        sections.push(close(heading, &lines));
    }

    sections
}

fn close(heading: String, lines: &[&str]) -> Section {
    Section {
        heading,
        content: lines.join("\n").trim().to_string(),
    }
}
