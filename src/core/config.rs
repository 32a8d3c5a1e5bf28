use serde_json::Value;

use crate::analysis::analyzer::{TextAnalysis, TokenizerConfig};
use crate::core::error::Result;
use crate::core::types::Document;

/// Sorting configuration at creation time.
#[derive(Debug, Clone)]
pub struct SortConfig {
    pub enabled: bool,
    pub unsortable_properties: Vec<String>, // scalar paths to leave unsorted
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            enabled: true,
            unsortable_properties: Vec::new(),
        }
    }
}

/// Replace the built-in tokenizer with a configuration or a finished
/// instance. Passing an instance together with a `language` at create time
/// fails with `NO_LANGUAGE_WITH_CUSTOM_TOKENIZER`.
pub enum TokenizerOverride {
    Config(TokenizerConfig),
    Instance(Box<dyn TextAnalysis>),
}

pub type InsertHook = Box<dyn Fn(&str, &Document) -> Result<()> + Send + Sync>;
pub type RemoveHook = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;
/// Batch hooks: `before` sees the documents, `after` the assigned ids.
pub type BatchDocumentsHook = Box<dyn Fn(&[Document]) -> Result<()> + Send + Sync>;
pub type BatchIdsHook = Box<dyn Fn(&[String]) -> Result<()> + Send + Sync>;
/// Extract the external id from a document; `None` generates one.
pub type IdExtractor = Box<dyn Fn(&Document) -> Option<String> + Send + Sync>;
pub type ElapsedFormatter = Box<dyn Fn(u64) -> String + Send + Sync>;

/// Swappable collaborators and lifecycle hooks.
///
/// A hook returning an error vetoes the operation it wraps; `after` hooks
/// fire once the engine state is updated.
#[derive(Default)]
pub struct Components {
    pub tokenizer: Option<TokenizerOverride>,
    pub get_document_id: Option<IdExtractor>,
    pub format_elapsed_time: Option<ElapsedFormatter>,

    pub before_insert: Vec<InsertHook>,
    pub after_insert: Vec<InsertHook>,
    pub before_remove: Vec<RemoveHook>,
    pub after_remove: Vec<RemoveHook>,
    pub before_update: Vec<InsertHook>,
    pub after_update: Vec<InsertHook>,

    pub before_insert_multiple: Vec<BatchDocumentsHook>,
    pub after_insert_multiple: Vec<BatchIdsHook>,
    pub before_remove_multiple: Vec<BatchIdsHook>,
    pub after_remove_multiple: Vec<BatchIdsHook>,
    pub before_update_multiple: Vec<BatchDocumentsHook>,
    pub after_update_multiple: Vec<BatchIdsHook>,
}

/// Arguments for [`Database::create`](crate::core::database::Database::create).
pub struct CreateArgs {
    /// Schema definition: property names mapped to type strings or nested
    /// objects, e.g. `{"title": "string", "meta": {"rating": "number"}}`.
    pub schema: Value,
    /// Language name from the closed supported set; `None` means english.
    pub language: Option<String>,
    pub sort: SortConfig,
    pub components: Components,
    /// Instance id; generated when absent.
    pub id: Option<String>,
}

impl CreateArgs {
    pub fn new(schema: Value) -> Self {
        CreateArgs {
            schema,
            language: None,
            sort: SortConfig::default(),
            components: Components::default(),
            id: None,
        }
    }
}
