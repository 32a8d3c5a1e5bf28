use crate::analysis::filter::{DedupFilter, StemmerFilter, StopWordFilter, TokenFilter};
use crate::analysis::language::Language;
use crate::analysis::tokenizer::{Tokenizer, WordTokenizer};
use crate::core::error::Result;

/// Stop-word handling for a tokenizer.
#[derive(Debug, Clone, Default)]
pub enum StopWordsConfig {
    /// The language's default list.
    #[default]
    Default,
    /// A caller-supplied replacement list.
    Custom(Vec<String>),
    /// No stop-word filtering at all.
    Disabled,
}

/// Tokenizer configuration.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    pub language: Language,
    pub stemming: bool,
    pub stop_words: StopWordsConfig,
    pub allow_duplicates: bool, // keep repeated tokens within one call
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            language: Language::English,
            stemming: true,
            stop_words: StopWordsConfig::Default,
            allow_duplicates: false,
        }
    }
}

/// The analysis seam the engine depends on.
///
/// The built-in implementation is [`TextAnalyzer`]; hosts may supply their
/// own (see `Components::tokenizer`), in which case the engine never looks
/// past this trait.
pub trait TextAnalysis: Send + Sync {
    fn analyze(&self, text: &str) -> Vec<String>;

    fn language(&self) -> Language;
}

/// Text analysis pipeline: tokenize, drop stop words, stem, dedup.
pub struct TextAnalyzer {
    language: Language,
    tokenizer: Box<dyn Tokenizer>,
    filters: Vec<Box<dyn TokenFilter>>,
}

impl TextAnalyzer {
    pub fn from_config(config: &TokenizerConfig) -> Result<Self> {
        let language = config.language;
        let tokenizer: Box<dyn Tokenizer> = Box::new(WordTokenizer::new(language));

        let mut filters: Vec<Box<dyn TokenFilter>> = Vec::new();
        match &config.stop_words {
            StopWordsConfig::Default => {
                filters.push(Box::new(StopWordFilter::for_language(language)));
            }
            StopWordsConfig::Custom(words) => {
                filters.push(Box::new(StopWordFilter::new(words.clone())));
            }
            StopWordsConfig::Disabled => {}
        }
        if config.stemming {
            filters.push(Box::new(StemmerFilter::new(language.stemmer_algorithm())));
        }
        if !config.allow_duplicates {
            filters.push(Box::new(DedupFilter));
        }

        Ok(TextAnalyzer {
            language,
            tokenizer,
            filters,
        })
    }

    /// English defaults.
    pub fn standard() -> Self {
        // The default config cannot fail to build.
        TextAnalyzer::from_config(&TokenizerConfig::default()).unwrap()
    }
}

impl TextAnalysis for TextAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> {
        let mut tokens = self.tokenizer.tokenize(text);

        for filter in &self.filters {
            tokens = filter.apply(tokens);
        }

        tokens
    }

    fn language(&self) -> Language {
        self.language
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_pipeline_on_english() {
        let analyzer = TextAnalyzer::standard();
        assert_eq!(
            analyzer.analyze("The quick brown foxes"),
            vec!["quick", "brown", "fox"]
        );
    }

    #[test]
    fn stop_words_can_be_disabled() {
        let analyzer = TextAnalyzer::from_config(&TokenizerConfig {
            stop_words: StopWordsConfig::Disabled,
            stemming: false,
            ..TokenizerConfig::default()
        })
        .unwrap();
        assert_eq!(
            analyzer.analyze("the quick fox"),
            vec!["the", "quick", "fox"]
        );
    }

    #[test]
    fn duplicates_removed_unless_allowed() {
        let config = TokenizerConfig {
            stemming: false,
            ..TokenizerConfig::default()
        };
        let analyzer = TextAnalyzer::from_config(&config).unwrap();
        assert_eq!(analyzer.analyze("fox fox fox"), vec!["fox"]);

        let analyzer = TextAnalyzer::from_config(&TokenizerConfig {
            allow_duplicates: true,
            ..config
        })
        .unwrap();
        assert_eq!(analyzer.analyze("fox fox fox"), vec!["fox", "fox", "fox"]);
    }

    #[test]
    fn stemming_applies_the_language_algorithm() {
        let analyzer = TextAnalyzer::from_config(&TokenizerConfig {
            language: Language::Italian,
            stop_words: StopWordsConfig::Disabled,
            ..TokenizerConfig::default()
        })
        .unwrap();
        // "camminare" (to walk) stems to "cammin" in snowball italian.
        assert_eq!(analyzer.analyze("camminare"), vec!["cammin"]);
    }
}
