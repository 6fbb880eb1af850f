//! Keyword search over the module registry, gallery examples and page sections.
//!
//! Queries are split into lowercase terms (camelCase tokens are decomposed) and each
//! record type is scored with its own weight table. Ranking is deterministic: higher
//! scores first, ties in input order, zero scores dropped.

pub mod scoring;
pub mod sections;
pub mod tokenize;

pub use scoring::{Scorable, rank, score_examples, score_modules, search_sections};
pub use sections::{Section, parse_sections};
pub use tokenize::split_terms;
