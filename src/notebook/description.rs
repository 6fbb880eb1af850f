//! Plain-text description from a notebook's first markdown cell.

use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// function _1(md){return(
// md`...`
// )}
regex!(MD_CELL_MULTILINE, r"(?s)function\s+_\d+\(md\)\s*\{return\(\s*\nmd`(.*?)`\s*\n\)\}");
// function _1(md){return( md`...` )}
regex!(MD_CELL_INLINE, r"(?s)function\s+_\d+\(md\)\s*\{return\(\s*md`(.*?)`\s*\)\}");

regex!(HTML_TAG, r"<[^>]+>");
regex!(MD_LINK, r"\[([^\]]+)\]\([^)]+\)");
regex!(MD_EMPHASIS, r"[*_]+([^*_]+)[*_]+");
regex!(WHITESPACE, r"\s+");
regex!(BREADCRUMB, r"^.*?D3\s*\x{203a}\s*Gallery\s*");
regex!(LEADING_HEADING, r"^#\s+\S[^#]*?\s+");

/// Extract the description from the first markdown cell, or `""` if there is none.
pub fn extract_description(source: &str) -> String {
    let Some(caps) = MD_CELL_MULTILINE
        .captures(source)
        .or_else(|| MD_CELL_INLINE.captures(source))
    else {
        return String::new();
    };
    clean_markdown(&caps[1])
}

/// Reduce cell markdown to a single line of prose.
fn clean_markdown(markdown: &str) -> String {
    let text = HTML_TAG.replace_all(markdown, "");
    let text = MD_LINK.replace_all(&text, "$1");
    let text = MD_EMPHASIS.replace_all(&text, "$1");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = text.trim();
    let text = BREADCRUMB.replace(text, "");
    let text = LEADING_HEADING.replace(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[test]
    fn test_inline_cell() {
        let source = "function _1(md){return( md`Some **bold** words` )}";
        check!(extract_description(source) == "Some bold words");
    }

    #[test]
    fn test_multiline_cell_with_breadcrumb() {
        let source = "function _1(md){return(\nmd`<div><a href=\"https://d3js.org/\">D3</a> \u{203a} <a href=\"/@d3/gallery\">Gallery</a></div>\n\n# Pie chart\n\nThis [chart](https://example.com) shows _shares_.`\n)}";
        let description = extract_description(source);
        check!(description == "chart This chart shows shares.");
    }

    #[test]
    fn test_missing_markdown_cell() {
        check!(extract_description("function _chart(d3) { return 1; }") == "");
    }

    #[rstest]
    #[case("<b>Tag</b> text", "Tag text")]
    #[case("[link text](https://x.y/z)", "link text")]
    #[case("a   \n\n  b", "a b")]
    #[case("# Title Words rest of text", "Words rest of text")]
    #[case("No heading here", "No heading here")]
    fn test_clean_markdown(#[case] input: &str, #[case] expected: &str) {
        check!(clean_markdown(input) == expected);
    }
}
