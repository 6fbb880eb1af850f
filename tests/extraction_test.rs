mod common;

use assert2::{check, let_assert};
use common::{BAR_CHART_JS, FORCE_GRAPH_JS, GALLERY_HTML, SCALE_MARKDOWN};
use d3_docs_mcp::gallery::parse_gallery;
use d3_docs_mcp::notebook::{NotebookExtraction, extract_description, extract_notebook_code};
use d3_docs_mcp::search::{parse_sections, search_sections};
use rstest::rstest;

const BASE: &str = "https://observablehq.com";

// --- Gallery ---

#[test]
fn gallery_fixture_yields_every_preview() {
    let examples = parse_gallery(GALLERY_HTML);
    let paths: Vec<&str> = examples.iter().map(|e| e.path.as_str()).collect();
    check!(
        paths
            == vec![
                "@d3/animated-treemap",
                "@d3/bar-chart-race",
                "@d3/bar-chart/2",
                "@mbostock/electric-usage-2019",
            ]
    );
}

#[rstest]
#[case("@d3/animated-treemap", "Animated treemap", "Animation", "D3")]
#[case("@d3/bar-chart/2", "Bar chart", "Bars", "D3")]
#[case("@mbostock/electric-usage-2019", "Electricity usage, 2019", "Bars", "Mike Bostock")]
fn gallery_fields(#[case] path: &str, #[case] title: &str, #[case] category: &str, #[case] author: &str) {
    let examples = parse_gallery(GALLERY_HTML);
    let_assert!(Some(example) = examples.iter().find(|e| e.path == path));
    check!(example.title == title);
    check!(example.category == category);
    check!(example.author == author);
}

#[test]
fn gallery_without_previews_is_empty() {
    check!(parse_gallery("<html></html>").is_empty());
}

// --- Notebooks ---

#[test]
fn bar_chart_description_drops_breadcrumb() {
    let description = extract_description(BAR_CHART_JS);
    check!(description.contains("relative frequency of letters"));
    check!(!description.contains("Gallery"));
    check!(!description.contains('<'));
}

#[test]
fn bar_chart_extraction() {
    let_assert!(Some(extraction) = NotebookExtraction::from_source(BAR_CHART_JS, BASE));

    check!(extraction.code.starts_with(
        "// Data: data\n// FileAttachment(\"alphabet.csv\").csv({typed: \"auto\"})\n\n// Dependencies: data\nconst width = 928;"
    ));
    check!(extraction.code.ends_with("return svg.node();"));
    check!(
        extraction.attachments
            == vec![(
                "alphabet.csv".to_string(),
                "https://static.observableusercontent.com/files/abc123".to_string()
            )]
    );
    check!(extraction.imports.is_empty());
}

#[test]
fn bar_chart_rendering() {
    let rendered = extract_notebook_code(BAR_CHART_JS, BASE);
    let_assert!(Some((description, rest)) = rendered.split_once("\n\n```js\n"));
    check!(description.ends_with("This chart shows the relative frequency of letters in the English language."));
    check!(rest.contains("\n```\n\n**Data files:**\n\n- `alphabet.csv`: https://static.observableusercontent.com/files/abc123"));
    check!(!rendered.contains("**Imported helpers:**"));
}

#[test]
fn environment_dependencies_are_not_listed() {
    let_assert!(Some(extraction) = NotebookExtraction::from_source(FORCE_GRAPH_JS, BASE));
    check!(extraction.code.contains("// Dependencies: data\n"));
    check!(!extraction.code.contains("invalidation,"));
    check!(extraction.code.contains("d3.forceSimulation(data.nodes)"));
    check!(extraction.code.contains("// FileAttachment(\"miserables.json\").json()"));
}

#[test]
fn imported_helpers_are_rendered_as_links() {
    let source = format!(
        "{}\n  main.define(\"module 1\", async () => runtime.module((await import(\"/@d3/color-legend.js?v=4\")).default));\n  main.define(\"Legend\", [\"module 1\", \"@variable\"], (_, v) => v.import(\"Legend\", _));\n",
        BAR_CHART_JS
    );
    let rendered = extract_notebook_code(&source, BASE);
    check!(rendered.contains(
        "**Imported helpers:**\n\n- `Legend` from [https://observablehq.com/@d3/color-legend](https://observablehq.com/@d3/color-legend)"
    ));
    // helpers come before data files
    let helpers = rendered.find("**Imported helpers:**");
    let data = rendered.find("**Data files:**");
    check!(helpers < data);
}

// --- Sections ---

#[test]
fn scale_page_sections() {
    let sections = parse_sections(SCALE_MARKDOWN);
    let headings: Vec<&str> = sections.iter().map(|s| s.heading.as_str()).collect();
    check!(
        headings
            == vec![
                "Continuous Scales",
                "scaleLinear",
                "continuous_domain",
                "Clamping",
                "Sequential Scales",
                "scaleSequential",
            ]
    );
    check!(sections[1].content.starts_with("<a name=\"scaleLinear\""));
    check!(sections[1].content.ends_with("unit range [0, 1]."));
}

#[rstest]
#[case("scaleLinear", "scaleLinear")]
#[case("clamping", "Clamping")]
#[case("sequential interpolator", "Sequential Scales")]
fn scale_page_search(#[case] query: &str, #[case] expected: &str) {
    let sections = parse_sections(SCALE_MARKDOWN);
    let results = search_sections(query, &sections, 10);
    let_assert!(Some(first) = results.first());
    check!(first.heading == expected);
}

#[test]
fn scale_page_search_respects_cap_and_misses() {
    let sections = parse_sections(SCALE_MARKDOWN);
    check!(search_sections("scale", &sections, 2).len() == 2);
    check!(search_sections("zzzznotfound", &sections, 10).is_empty());
}
