//! Reduction of rendered documentation pages to markdown.

use html2md::rewrite_html as html_to_markdown;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

// The docs site renders page content into <main class="main">; older layouts only
// have the inner div.vp-doc.
selector!(MAIN_SELECTOR, "main.main");
selector!(VP_DOC_SELECTOR, "div.vp-doc");
selector!(BODY_SELECTOR, "body");
selector!(NOISE_SELECTOR, "script, style, img");

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Isolate the documentation body of `html` and convert it to markdown.
///
/// Container preference: `main.main`, then `div.vp-doc`, then `<body>`, then the
/// whole input. Scripts, styles and images are dropped before conversion.
pub fn html_to_doc_markdown(html: &str) -> String {
    let document = Html::parse_document(html);

    let container = [&*MAIN_SELECTOR, &*VP_DOC_SELECTOR, &*BODY_SELECTOR]
        .into_iter()
        .find_map(|selector| document.select(selector).next())
        .map_or_else(|| html.to_string(), |element| element.html());

    let cleaned = strip_noise(&container);
    let markdown = html_to_markdown(&cleaned, true);
    EXCESS_NEWLINES
        .replace_all(&markdown, "\n\n")
        .trim()
        .to_string()
}

/// Detach non-content elements from a fragment and re-serialize it.
fn strip_noise(fragment_html: &str) -> String {
    let mut fragment = Html::parse_fragment(fragment_html);
    let noise: Vec<_> = fragment.select(&NOISE_SELECTOR).map(|el| el.id()).collect();

    for id in noise {
        if let Some(mut node) = fragment.tree.get_mut(id) {
            node.detach();
        }
    }

    fragment.root_element().inner_html()
}
