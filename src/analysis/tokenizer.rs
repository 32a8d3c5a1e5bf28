use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::language::{FoldedChar, Language};

/// Splits raw text into normalized word tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;

    fn name(&self) -> &str;

    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

/// Unicode word tokenizer.
///
/// Splits on non-word characters (UAX#29 word boundaries), lowercases, and
/// folds diacritics according to the language's rules.
#[derive(Clone)]
pub struct WordTokenizer {
    pub language: Language,
}

impl WordTokenizer {
    pub fn new(language: Language) -> Self {
        WordTokenizer { language }
    }

    fn normalize(&self, word: &str) -> String {
        let mut out = String::with_capacity(word.len());
        for c in word.chars() {
            for lowered in c.to_lowercase() {
                match self.language.fold_char(lowered) {
                    FoldedChar::One(f) => out.push(f),
                    FoldedChar::Two(a, b) => {
                        out.push(a);
                        out.push(b);
                    }
                }
            }
        }
        out
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .map(|word| self.normalize(word))
            .filter(|word| !word.is_empty())
            .collect()
    }

    fn name(&self) -> &str {
        "word"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_word_characters() {
        let tokenizer = WordTokenizer::new(Language::English);
        assert_eq!(
            tokenizer.tokenize("Hello, world! foo-bar_baz"),
            vec!["hello", "world", "foo", "bar_baz"]
        );
    }

    #[test]
    fn lowercases_and_folds() {
        let tokenizer = WordTokenizer::new(Language::French);
        assert_eq!(tokenizer.tokenize("Élève déjà"), vec!["eleve", "deja"]);

        let tokenizer = WordTokenizer::new(Language::German);
        assert_eq!(tokenizer.tokenize("Straße"), vec!["strasse"]);
    }

    #[test]
    fn empty_input_gives_no_tokens() {
        let tokenizer = WordTokenizer::new(Language::English);
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("  ...  ").is_empty());
    }
}
