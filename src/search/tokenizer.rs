use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Runs of Unicode letters and digits; everything else separates words.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("word pattern compiles"));

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|word| word.chars().count() > 2)
}

/// Distinct lowercase words longer than two characters.
pub fn tokenize_text(text: &str) -> HashSet<String> {
    words(text).collect()
}

/// Query terms in order, split and filtered exactly like [`tokenize_text`].
pub fn tokenize_query(query: &str) -> Vec<String> {
    words(query).collect()
}
