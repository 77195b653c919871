//! Title tokenization and stopword filtering.
//!
//! Two views of the same token stream are used by keyword pruning:
//! [`word_counts`] counts repeats across every title (bag semantics) to rank
//! words by frequency, while [`word_set`] answers "does this title contain
//! the word" for shortlist membership (set semantics).

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Words that carry no matching signal in market titles.
const STOPWORDS: &[&str] = &[
    "a", "after", "all", "am", "an", "and", "announced", "another", "are", "as", "at", "be",
    "before", "between", "by", "during", "end", "fewer", "for", "has", "high", "his", "in",
    "inside", "into", "is", "it", "its", "live", "member", "more", "most", "new", "next", "no",
    "not", "now", "of", "oh", "on", "or", "out", "reach", "say", "seven", "start", "than", "the",
    "there", "this", "time", "times", "to", "us", "will", "with", "year",
];

fn stopwords() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOPWORDS.iter().copied().collect())
}

/// Whether `word` is on the stopword list.
#[must_use]
pub fn is_stopword(word: &str) -> bool {
    stopwords().contains(word)
}

/// Split text on word boundaries into lowercase tokens, keeping repeats.
///
/// Stopwords and purely numeric tokens are dropped. Empty or
/// punctuation-only text yields nothing.
pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|raw| !raw.is_empty())
        .map(str::to_lowercase)
        .filter(|word| !is_stopword(word) && !word.chars().all(char::is_numeric))
}

/// Distinct filtered tokens of one title.
#[must_use]
pub fn word_set(text: &str) -> HashSet<String> {
    tokens(text).collect()
}

/// Filtered token counts across many titles, repeats included.
pub fn word_counts<'a, I>(titles: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = HashMap::new();
    for title in titles {
        for word in tokens(title) {
            *counts.entry(word).or_insert(0) += 1;
        }
    }
    counts
}
