//! Locating named function cells and extracting their bodies.

use regex::Regex;
use std::sync::LazyLock;

static ASYNC_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^async\s+function\s+(_?\w+)\(([^)]*)\)\s*\{").unwrap()
});
static SYNC_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^function\s+(_?\w+)\(([^)]*)\)\s*\{").unwrap());

/// A function cell found in notebook source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub name: String,
    /// Raw parameter list, trimmed (e.g. `d3,data`)
    pub params: String,
    /// Body between the braces, trimmed; prefixed with `async ` for async cells
    pub body: String,
}

impl Cell {
    /// Parameters split on commas, trimmed, empties dropped.
    pub fn param_list(&self) -> Vec<&str> {
        self.params
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

/// Find the cell declared as `function <name>(...) {`, preferring async declarations.
///
/// Returns `None` when no declaration matches; that is an absence, not an error.
pub fn extract_cell(source: &str, name: &str) -> Option<Cell> {
    for (pattern, prefix) in [(&*ASYNC_CELL, "async "), (&*SYNC_CELL, "")] {
        for caps in pattern.captures_iter(source) {
            if &caps[1] != name {
                continue;
            }
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let body = extract_function_body(source, whole.end());
            return Some(Cell {
                name: name.to_string(),
                params: caps[2].trim().to_string(),
                body: format!("{}{}", prefix, body),
            });
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    /// Inside a string or template literal closed by this delimiter
    InString(u8),
    InLineComment,
    InBlockComment,
}

/// Extract a function body given the byte offset just past its opening brace.
///
/// Tracks brace depth while treating string/template literals and comments as
/// opaque. Returns the trimmed text before the matching close brace, or an empty
/// string if the source ends first.
pub fn extract_function_body(source: &str, start: usize) -> &str {
    let bytes = source.as_bytes();
    let mut depth = 1usize;
    let mut state = ScanState::Normal;
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];
        match state {
            ScanState::Normal => match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return source[start..i].trim();
                    }
                }
                b'"' | b'\'' | b'`' => state = ScanState::InString(b),
                b'/' if bytes.get(i + 1) == Some(&b'/') => {
                    state = ScanState::InLineComment;
                    i += 1;
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    state = ScanState::InBlockComment;
                    i += 1;
                }
                _ => {}
            },
            ScanState::InString(quote) => {
                if b == b'\\' {
                    // skip the escaped byte
                    i += 1;
                } else if b == quote {
                    state = ScanState::Normal;
                }
            }
            ScanState::InLineComment => {
                if b == b'\n' {
                    state = ScanState::Normal;
                }
            }
            ScanState::InBlockComment => {
                if b == b'*' && bytes.get(i + 1) == Some(&b'/') {
                    state = ScanState::Normal;
                    i += 1;
                }
            }
        }
        i += 1;
    }

    ""
}
