use regex::Regex;
use std::sync::LazyLock;

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]+$").expect("word pattern is a valid regex")
});

/// Accepts a non-empty run of ASCII letters and nothing else.
///
/// No trimming or case folding: `" cat"` and `"cat1"` are both rejected.
pub fn is_valid_word(value: &str) -> bool {
    WORD_PATTERN.is_match(value)
}
