use std::collections::HashSet;

use rust_stemmers::{Algorithm, Stemmer};

use crate::analysis::language::Language;
use crate::analysis::stopwords;

/// Transforms a token stream; filters are applied in registration order.
pub trait TokenFilter: Send + Sync {
    fn apply(&self, tokens: Vec<String>) -> Vec<String>;

    fn name(&self) -> &str;
}

/// Drops tokens found in the stop-word set.
pub struct StopWordFilter {
    pub stop_words: HashSet<String>,
}

impl StopWordFilter {
    pub fn new(stop_words: Vec<String>) -> Self {
        StopWordFilter {
            stop_words: stop_words.into_iter().collect(),
        }
    }

    /// The default list for a language.
    pub fn for_language(language: Language) -> Self {
        StopWordFilter {
            stop_words: stopwords::stop_words(language)
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }
}

impl TokenFilter for StopWordFilter {
    fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|token| !self.stop_words.contains(token))
            .collect()
    }

    fn name(&self) -> &str {
        "stop_words"
    }
}

/// Reduces tokens to their snowball stems.
pub struct StemmerFilter {
    pub algorithm: Algorithm,
}

impl StemmerFilter {
    pub fn new(algorithm: Algorithm) -> Self {
        StemmerFilter { algorithm }
    }
}

impl TokenFilter for StemmerFilter {
    fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        let stemmer = Stemmer::create(self.algorithm);

        tokens
            .into_iter()
            .map(|token| stemmer.stem(&token).to_string())
            .collect()
    }

    fn name(&self) -> &str {
        "stemmer"
    }
}

/// Removes repeated tokens, keeping first occurrences in order.
pub struct DedupFilter;

impl TokenFilter for DedupFilter {
    fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        let mut seen = HashSet::with_capacity(tokens.len());
        tokens
            .into_iter()
            .filter(|token| seen.insert(token.clone()))
            .collect()
    }

    fn name(&self) -> &str {
        "dedup"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn stop_word_filter_drops_defaults() {
        let filter = StopWordFilter::for_language(Language::English);
        assert_eq!(
            filter.apply(tokens(&["the", "quick", "brown", "fox"])),
            tokens(&["quick", "brown", "fox"])
        );
    }

    #[test]
    fn custom_stop_words_replace_defaults() {
        let filter = StopWordFilter::new(tokens(&["quick"]));
        assert_eq!(
            filter.apply(tokens(&["the", "quick", "fox"])),
            tokens(&["the", "fox"])
        );
    }

    #[test]
    fn stemmer_reduces_english_plurals() {
        let filter = StemmerFilter::new(Algorithm::English);
        let out = filter.apply(tokens(&["running", "foxes"]));
        assert_eq!(out, tokens(&["run", "fox"]));
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let out = DedupFilter.apply(tokens(&["b", "a", "b", "c", "a"]));
        assert_eq!(out, tokens(&["b", "a", "c"]));
    }
}
