//! Query tokenization.

/// Split a query into lowercase search terms, decomposing camelCase tokens.
///
/// Tokens are whitespace-separated. A token containing a lowercase → uppercase
/// transition contributes each sub-word followed by the whole token:
/// - `"scaleLinear"` → `["scale", "linear", "scalelinear"]`
/// - `"bar chart"` → `["bar", "chart"]`
///
/// Repeated terms are kept; each occurrence counts during scoring.
pub fn split_terms(query: &str) -> Vec<String> {
    let mut terms = Vec::new();
    for token in query.split_whitespace() {
        let parts = camel_parts(token);
        if parts.len() > 1 {
            terms.extend(parts.into_iter().map(str::to_lowercase));
        }
        terms.push(token.to_lowercase());
    }
    terms
}

/// Split a token at every lowercase → uppercase boundary.
///
/// Digits and hyphens are not boundaries: `d3Scale` and `d3-scale` stay whole.
fn camel_parts(token: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut last_lower = false;

    for (i, c) in token.char_indices() {
        if last_lower && c.is_uppercase() {
            parts.push(&token[start..i]);
            start = i;
        }
        last_lower = c.is_lowercase();
    }
    if start < token.len() {
        parts.push(&token[start..]);
    }
    parts
}
