use std::fmt;
use std::str::FromStr;

use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, ErrorKind, Result};

/// The closed set of supported languages.
///
/// Every language maps to a snowball stemmer and a default stop-word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Danish,
    Dutch,
    English,
    Finnish,
    French,
    German,
    Italian,
    Norwegian,
    Portuguese,
    Russian,
    Spanish,
    Swedish,
}

pub const SUPPORTED_LANGUAGES: [Language; 12] = [
    Language::Danish,
    Language::Dutch,
    Language::English,
    Language::Finnish,
    Language::French,
    Language::German,
    Language::Italian,
    Language::Norwegian,
    Language::Portuguese,
    Language::Russian,
    Language::Spanish,
    Language::Swedish,
];

impl Language {
    pub fn name(&self) -> &'static str {
        match self {
            Language::Danish => "danish",
            Language::Dutch => "dutch",
            Language::English => "english",
            Language::Finnish => "finnish",
            Language::French => "french",
            Language::German => "german",
            Language::Italian => "italian",
            Language::Norwegian => "norwegian",
            Language::Portuguese => "portuguese",
            Language::Russian => "russian",
            Language::Spanish => "spanish",
            Language::Swedish => "swedish",
        }
    }

    /// Snowball algorithm backing this language's stemmer.
    pub fn stemmer_algorithm(&self) -> Algorithm {
        match self {
            Language::Danish => Algorithm::Danish,
            Language::Dutch => Algorithm::Dutch,
            Language::English => Algorithm::English,
            Language::Finnish => Algorithm::Finnish,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Italian => Algorithm::Italian,
            Language::Norwegian => Algorithm::Norwegian,
            Language::Portuguese => Algorithm::Portuguese,
            Language::Russian => Algorithm::Russian,
            Language::Spanish => Algorithm::Spanish,
            Language::Swedish => Algorithm::Swedish,
        }
    }

    /// Fold a lowercased character to its base form for this language.
    ///
    /// Latin-script languages strip the diacritics their orthography uses;
    /// Russian keeps Cyrillic untouched apart from ё → е.
    pub fn fold_char(&self, c: char) -> FoldedChar {
        match self {
            Language::Russian => match c {
                'ё' => FoldedChar::One('е'),
                _ => FoldedChar::One(c),
            },
            Language::German => match c {
                'ä' => FoldedChar::One('a'),
                'ö' => FoldedChar::One('o'),
                'ü' => FoldedChar::One('u'),
                'ß' => FoldedChar::Two('s', 's'),
                _ => fold_latin(c),
            },
            _ => fold_latin(c),
        }
    }
}

/// A folded character expands to at most two output characters (ß → ss).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldedChar {
    One(char),
    Two(char, char),
}

fn fold_latin(c: char) -> FoldedChar {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => 'i',
        'ñ' | 'ń' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => 'o',
        'š' => 's',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' => 'u',
        'ý' | 'ÿ' => 'y',
        'ž' | 'ź' | 'ż' => 'z',
        'æ' => return FoldedChar::Two('a', 'e'),
        'œ' => return FoldedChar::Two('o', 'e'),
        'ß' => return FoldedChar::Two('s', 's'),
        _ => c,
    };
    FoldedChar::One(folded)
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Language> {
        let lowered = s.to_lowercase();
        SUPPORTED_LANGUAGES
            .iter()
            .find(|language| language.name() == lowered)
            .copied()
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::LanguageNotSupported,
                    format!("language '{}' is not supported", s),
                )
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_languages() {
        assert_eq!("english".parse::<Language>().unwrap(), Language::English);
        assert_eq!("Swedish".parse::<Language>().unwrap(), Language::Swedish);
    }

    #[test]
    fn rejects_unknown_language() {
        let err = "klingon".parse::<Language>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::LanguageNotSupported);
    }

    #[test]
    fn folds_diacritics() {
        assert_eq!(Language::French.fold_char('é'), FoldedChar::One('e'));
        assert_eq!(Language::German.fold_char('ß'), FoldedChar::Two('s', 's'));
        assert_eq!(Language::Russian.fold_char('ё'), FoldedChar::One('е'));
        assert_eq!(Language::Russian.fold_char('ж'), FoldedChar::One('ж'));
    }
}
