use std::fmt;

/// Error categories with stable string codes.
///
/// The codes are part of the public contract: hosts match on them, so they
/// never change even when the message wording does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LanguageNotSupported,
    InvalidSchemaType,
    InvalidSortSchemaType,
    UnknownFilterProperty,
    InvalidFilterOperation,
    SortDisabled,
    UnableToSortOnUnknownField,
    ComponentMustBeFunction,
    ComponentMustBeFunctionOrArrayFunctions,
    UnsupportedComponent,
    NoLanguageWithCustomTokenizer,
    DocumentAlreadyExists,
    Io,
    Serialization,
}

impl ErrorKind {
    /// Stable code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::LanguageNotSupported => "LANGUAGE_NOT_SUPPORTED",
            ErrorKind::InvalidSchemaType => "INVALID_SCHEMA_TYPE",
            ErrorKind::InvalidSortSchemaType => "INVALID_SORT_SCHEMA_TYPE",
            ErrorKind::UnknownFilterProperty => "UNKNOWN_FILTER_PROPERTY",
            ErrorKind::InvalidFilterOperation => "INVALID_FILTER_OPERATION",
            ErrorKind::SortDisabled => "SORT_DISABLED",
            ErrorKind::UnableToSortOnUnknownField => "UNABLE_TO_SORT_ON_UNKNOWN_FIELD",
            ErrorKind::ComponentMustBeFunction => "COMPONENT_MUST_BE_FUNCTION",
            ErrorKind::ComponentMustBeFunctionOrArrayFunctions => {
                "COMPONENT_MUST_BE_FUNCTION_OR_ARRAY_FUNCTIONS"
            }
            ErrorKind::UnsupportedComponent => "UNSUPPORTED_COMPONENT",
            ErrorKind::NoLanguageWithCustomTokenizer => "NO_LANGUAGE_WITH_CUSTOM_TOKENIZER",
            ErrorKind::DocumentAlreadyExists => "DOCUMENT_ALREADY_EXISTS",
            ErrorKind::Io => "IO",
            ErrorKind::Serialization => "SERIALIZATION",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: String) -> Self {
        Error { kind, context }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.context)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Serialization,
            context: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            ErrorKind::LanguageNotSupported.code(),
            "LANGUAGE_NOT_SUPPORTED"
        );
        assert_eq!(ErrorKind::SortDisabled.code(), "SORT_DISABLED");
        assert_eq!(
            ErrorKind::NoLanguageWithCustomTokenizer.code(),
            "NO_LANGUAGE_WITH_CUSTOM_TOKENIZER"
        );
    }

    #[test]
    fn display_prefixes_the_code() {
        let err = Error::new(
            ErrorKind::UnknownFilterProperty,
            "no such property 'color'".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "UNKNOWN_FILTER_PROPERTY: no such property 'color'"
        );
    }
}
