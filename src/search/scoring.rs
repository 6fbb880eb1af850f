//! Weighted term scoring for modules, gallery examples and page sections.
//!
//! Each record type has its own weight table. Module weights stack freely; for
//! examples, an exact title-word hit and a title-substring hit are mutually
//! exclusive for a given term.

use super::sections::Section;
use super::tokenize::split_terms;
use crate::gallery::Example;
use crate::registry::ModuleRecord;

/// Module scoring: exact name or short-name match.
pub const MODULE_NAME_WEIGHT: u32 = 10;
/// Module scoring: exact tag match.
pub const MODULE_TAG_WEIGHT: u32 = 3;
/// Module scoring: term equals a word of the description.
pub const MODULE_DESCRIPTION_WEIGHT: u32 = 2;
/// Module scoring: term is a substring of some tag.
pub const MODULE_PARTIAL_TAG_WEIGHT: u32 = 1;

/// Example scoring: term equals a word of the title.
pub const EXAMPLE_TITLE_WORD_WEIGHT: u32 = 10;
/// Example scoring: term is a substring of the title (only without a word hit).
pub const EXAMPLE_TITLE_PARTIAL_WEIGHT: u32 = 5;
/// Example scoring: term equals the category.
pub const EXAMPLE_CATEGORY_WEIGHT: u32 = 3;
/// Example scoring: term is a substring of the path.
pub const EXAMPLE_PATH_WEIGHT: u32 = 1;

/// Section scoring: term is a substring of the heading.
pub const SECTION_HEADING_WEIGHT: u32 = 2;
/// Section scoring: term is a substring of the content.
pub const SECTION_CONTENT_WEIGHT: u32 = 1;

/// A record that can be scored against query terms.
pub trait Scorable {
    /// Total score for already-split, lowercase `terms`. Zero means no match.
    fn score(&self, terms: &[String]) -> u32;
}

impl Scorable for ModuleRecord {
    fn score(&self, terms: &[String]) -> u32 {
        let name = self.name.to_lowercase();
        let short_name = name.strip_prefix("d3-").unwrap_or(&name);
        let description = self.description.to_lowercase();
        let description_words: Vec<&str> = description.split_whitespace().collect();
        let tags: Vec<String> = self.tags.iter().map(|t| t.to_lowercase()).collect();

        let mut score = 0;
        for term in terms {
            let term = term.as_str();
            if term == name || term == short_name {
                score += MODULE_NAME_WEIGHT;
            }
            if tags.iter().any(|tag| tag == term) {
                score += MODULE_TAG_WEIGHT;
            }
            if description_words.contains(&term) {
                score += MODULE_DESCRIPTION_WEIGHT;
            }
            if tags.iter().any(|tag| tag.contains(term)) {
                score += MODULE_PARTIAL_TAG_WEIGHT;
            }
        }
        score
    }
}

impl Scorable for Example {
    fn score(&self, terms: &[String]) -> u32 {
        let title = self.title.to_lowercase();
        let title_words: Vec<&str> = title.split_whitespace().collect();
        let category = self.category.to_lowercase();
        let path = self.path.to_lowercase();

        let mut score = 0;
        for term in terms {
            let term = term.as_str();
            if title_words.contains(&term) {
                score += EXAMPLE_TITLE_WORD_WEIGHT;
            } else if title.contains(term) {
                score += EXAMPLE_TITLE_PARTIAL_WEIGHT;
            }
            if term == category {
                score += EXAMPLE_CATEGORY_WEIGHT;
            }
            if path.contains(term) {
                score += EXAMPLE_PATH_WEIGHT;
            }
        }
        score
    }
}

impl Scorable for Section {
    fn score(&self, terms: &[String]) -> u32 {
        let heading = self.heading.to_lowercase();
        let content = self.content.to_lowercase();

        terms
            .iter()
            .map(|term| {
                let mut score = 0;
                if heading.contains(term.as_str()) {
                    score += SECTION_HEADING_WEIGHT;
                }
                if content.contains(term.as_str()) {
                    score += SECTION_CONTENT_WEIGHT;
                }
                score
            })
            .sum()
    }
}

/// Score `records` against `query`, dropping non-matches.
///
/// Results are sorted by descending score; ties keep their input order.
pub fn rank<'a, T: Scorable>(query: &str, records: &'a [T]) -> Vec<(&'a T, u32)> {
    let terms = split_terms(query);
    let mut results: Vec<(&T, u32)> = records
        .iter()
        .map(|record| (record, record.score(&terms)))
        .filter(|(_, score)| *score > 0)
        .collect();
    // sort_by is stable
    results.sort_by(|(_, a), (_, b)| b.cmp(a));
    results
}

pub fn score_modules<'a>(query: &str, modules: &'a [ModuleRecord]) -> Vec<(&'a ModuleRecord, u32)> {
    rank(query, modules)
}

pub fn score_examples<'a>(query: &str, examples: &'a [Example]) -> Vec<(&'a Example, u32)> {
    rank(query, examples)
}

/// Best-matching sections, at most `max_results`.
pub fn search_sections<'a>(query: &str, sections: &'a [Section], max_results: usize) -> Vec<&'a Section> {
    rank(query, sections)
        .into_iter()
        .take(max_results)
        .map(|(section, _)| section)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::{fixture, rstest};

    #[fixture]
    fn modules() -> Vec<ModuleRecord> {
        vec![
            ModuleRecord {
                name: "d3-scale",
                description: "Encodings that map abstract data to visual representation.",
                tags: &["scale", "linear", "log", "ordinal"],
                pages: &["/d3-scale", "/d3-scale/linear"],
            },
            ModuleRecord {
                name: "d3-shape",
                description: "Graphical primitives for visualization.",
                tags: &["shape", "arc", "pie", "line", "area", "curve"],
                pages: &["/d3-shape", "/d3-shape/arc"],
            },
            ModuleRecord {
                name: "d3-color",
                description: "Color spaces including RGB, HSL, Cubehelix, CIELAB.",
                tags: &["color", "rgb", "hsl", "lab"],
                pages: &["/d3-color"],
            },
        ]
    }

    fn example(path: &str, title: &str, category: &str) -> Example {
        Example {
            path: path.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            author: "D3".to_string(),
        }
    }

    #[fixture]
    fn examples() -> Vec<Example> {
        vec![
            example("@d3/bar-chart/2", "Bar chart", "Bars"),
            example("@d3/treemap/2", "Treemap", "Hierarchies"),
            example("@d3/force-directed-graph/2", "Force-directed graph", "Networks"),
            example("@d3/line-chart/2", "Line chart", "Lines"),
        ]
    }

    fn terms(query: &str) -> Vec<String> {
        split_terms(query)
    }

    #[rstest]
    #[case("d3-scale", "d3-scale")]
    #[case("scale", "d3-scale")]
    #[case("linear", "d3-scale")]
    #[case("Graphical", "d3-shape")]
    #[case("scaleLinear", "d3-scale")]
    #[case("scaleOrdinal", "d3-scale")]
    fn test_module_top_hit(modules: Vec<ModuleRecord>, #[case] query: &str, #[case] expected: &str) {
        let results = score_modules(query, &modules);
        check!(!results.is_empty());
        check!(results[0].0.name == expected);
    }

    #[rstest]
    fn test_module_weights_stack(modules: Vec<ModuleRecord>) {
        // name 10 + exact tag 3 + partial tag 1
        check!(modules[0].score(&terms("scale")) == 14);
        // exact tag 3 + partial tag 1 (+ "rgb," is not a description word)
        check!(modules[2].score(&terms("rgb")) == 4);
        // description word only
        check!(modules[1].score(&terms("primitives")) == 2);
    }

    #[rstest]
    fn test_example_title_weights_are_exclusive(examples: Vec<Example>) {
        // word hit 10, no extra 5 for the substring; path contains "bar" too
        check!(examples[0].score(&terms("bar")) == 11);
        // substring only: "tree" in "treemap" 5 + path 1
        check!(examples[1].score(&terms("tree")) == 6);
        // category only
        check!(examples[0].score(&terms("bars")) == 3);
    }

    #[rstest]
    #[case("bar", "@d3/bar-chart/2")]
    #[case("bar chart", "@d3/bar-chart/2")]
    #[case("barChart", "@d3/bar-chart/2")]
    #[case("lineChart", "@d3/line-chart/2")]
    #[case("networks", "@d3/force-directed-graph/2")]
    fn test_example_top_hit(examples: Vec<Example>, #[case] query: &str, #[case] expected: &str) {
        let results = score_examples(query, &examples);
        check!(!results.is_empty());
        check!(results[0].0.path == expected);
    }

    #[rstest]
    fn test_ranking_properties(examples: Vec<Example>, modules: Vec<ModuleRecord>) {
        let first = score_examples("chart", &examples);
        let second = score_examples("chart", &examples);
        check!(first == second);
        check!(first.iter().all(|(_, score)| *score > 0));
        check!(first.windows(2).all(|w| w[0].1 >= w[1].1));

        check!(score_modules("zzzznotfound", &modules).is_empty());
        check!(score_examples("zzzznotfound", &examples).is_empty());
    }

    #[rstest]
    fn test_ties_keep_input_order(examples: Vec<Example>) {
        // "chart" hits bar chart and line chart equally
        let results = score_examples("chart", &examples);
        check!(results[0].0.path == "@d3/bar-chart/2");
        check!(results[1].0.path == "@d3/line-chart/2");
        check!(results[0].1 == results[1].1);
    }

    #[test]
    fn test_section_weights() {
        let section = Section {
            heading: "Linear Scales".to_string(),
            content: "## Linear Scales\n\nLinear scales map a domain.".to_string(),
        };
        check!(section.score(&terms("linear")) == 3);
        check!(section.score(&terms("domain")) == 1);
        check!(section.score(&terms("linear domain")) == 4);
        check!(section.score(&terms("zzz")) == 0);
    }

    #[test]
    fn test_search_sections_caps_results() {
        let sections: Vec<Section> = (0..5)
            .map(|i| Section {
                heading: format!("Scale {}", i),
                content: "scale".to_string(),
            })
            .collect();
        check!(search_sections("scale", &sections, 2).len() == 2);
        check!(search_sections("scale", &sections, 10).len() == 5);
    }
}
