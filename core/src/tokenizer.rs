use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[\s,().\-]+").expect("valid regex");
}

/// Lower-case `text` and split it on runs of whitespace, commas, parentheses,
/// periods and hyphens. Empty pieces are dropped; duplicates are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    SEPARATORS
        .split(&lowered)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
