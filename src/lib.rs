//! # fennec
//!
//! An embeddable, in-memory full-text search engine over schema-typed
//! documents: BM25-ranked free-text search, filter expressions on numeric,
//! boolean and string fields, and sorting on scalar fields.
//!
//! ```
//! use fennec::{CreateArgs, Database, SearchParams};
//! use serde_json::json;
//!
//! let mut db = Database::create(CreateArgs::new(json!({
//!     "title": "string",
//!     "price": "number",
//! }))).unwrap();
//!
//! db.insert(json!({"title": "The Prancing Pony", "price": 9.5})
//!     .as_object().unwrap().clone()).unwrap();
//!
//! let results = db.search(&SearchParams::term("pony")).unwrap();
//! assert_eq!(results.count, 1);
//! ```

pub mod analysis;
pub mod core;
pub mod index;
pub mod schema;
pub mod scoring;
pub mod search;
pub mod sort;

pub use crate::analysis::analyzer::{
    StopWordsConfig, TextAnalysis, TextAnalyzer, TokenizerConfig,
};
pub use crate::analysis::language::Language;
pub use crate::core::config::{Components, CreateArgs, SortConfig, TokenizerOverride};
pub use crate::core::database::Database;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::persist::PersistedState;
pub use crate::core::types::{DocId, Document};
pub use crate::scoring::bm25::BM25Params;
pub use crate::search::params::{
    FacetDefinition, GroupByParams, NumberRange, SearchMode, SearchParams, SortByParams,
    SortOrder, WhereFilter,
};
pub use crate::search::results::{Elapsed, FacetResult, GroupResult, Hit, SearchResults};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
