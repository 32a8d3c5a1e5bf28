use log::{debug, warn};
use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

use crate::analysis::analyzer::{TextAnalysis, TextAnalyzer, TokenizerConfig};
use crate::analysis::language::Language;
use crate::core::config::{Components, CreateArgs, TokenizerOverride};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::id_store::IdStore;
use crate::core::store::DocumentStore;
use crate::core::types::{get_nested, DocId, Document};
use crate::index::index::Index;
use crate::schema::schema::{value_matches_type, Schema};
use crate::search::params::SearchParams;
use crate::search::results::SearchResults;
use crate::sort::sorter::{SortValue, Sorter};

/// The embeddable search database.
///
/// Single-writer: mutation goes through `&mut self`, and concurrent writes
/// need external exclusion. Reads (`search`) take `&self` and are safe to
/// run concurrently against a quiescent database; the sorter hides its
/// lazy re-sorting behind a lock of its own.
pub struct Database {
    pub id: String,
    pub schema: Schema,
    pub language: Language,
    pub analyzer: Box<dyn TextAnalysis>,
    pub index: Index,
    pub sorter: RwLock<Sorter>,
    pub docs: DocumentStore,
    pub id_store: IdStore,
    pub components: Components,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("id", &self.id)
            .field("schema", &self.schema)
            .field("language", &self.language)
            .field("index", &self.index)
            .field("sorter", &self.sorter)
            .field("docs", &self.docs)
            .field("id_store", &self.id_store)
            .field("components", &"<components>")
            .finish()
    }
}

impl Database {
    /// Create a database from a schema and configuration.
    pub fn create(args: CreateArgs) -> Result<Database> {
        let schema = Schema::parse(&args.schema)?;
        let mut components = args.components;

        let (analyzer, language): (Box<dyn TextAnalysis>, Language) =
            match components.tokenizer.take() {
                Some(TokenizerOverride::Instance(instance)) => {
                    if args.language.is_some() {
                        return Err(Error::new(
                            ErrorKind::NoLanguageWithCustomTokenizer,
                            "a custom tokenizer instance already fixes the language".to_string(),
                        ));
                    }
                    let language = instance.language();
                    (instance, language)
                }
                Some(TokenizerOverride::Config(mut config)) => {
                    if let Some(language) = &args.language {
                        config.language = language.parse()?;
                    }
                    let language = config.language;
                    (Box::new(TextAnalyzer::from_config(&config)?), language)
                }
                None => {
                    let mut config = TokenizerConfig::default();
                    if let Some(language) = &args.language {
                        config.language = language.parse()?;
                    }
                    let language = config.language;
                    (Box::new(TextAnalyzer::from_config(&config)?), language)
                }
            };

        let index = Index::from_schema(&schema);
        let sorter = Sorter::from_schema(
            &schema,
            args.sort.enabled,
            &args.sort.unsortable_properties,
            language,
        );

        Ok(Database {
            id: args.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            schema,
            language,
            analyzer,
            index,
            sorter: RwLock::new(sorter),
            docs: DocumentStore::new(),
            id_store: IdStore::new(),
            components,
        })
    }

    /// Number of stored documents.
    pub fn count(&self) -> usize {
        self.docs.len()
    }

    /// Insert a document, returning its external id.
    pub fn insert(&mut self, doc: Document) -> Result<String> {
        let external = self.extract_id(&doc);
        self.insert_with_id(external, doc)
    }

    fn insert_with_id(&mut self, external: String, doc: Document) -> Result<String> {
        for hook in &self.components.before_insert {
            hook(&external, &doc)?;
        }

        let internal = self.id_store.intern(&external);
        if self.docs.contains(internal) {
            return Err(Error::new(
                ErrorKind::DocumentAlreadyExists,
                format!("document '{}' already exists", external),
            ));
        }

        self.index_document(internal, &doc)?;
        self.docs.insert(internal, doc);
        debug!("inserted document '{}' as internal id {}", external, internal.0);

        for hook in &self.components.after_insert {
            let doc = self.docs.get(internal).expect("document just stored");
            hook(&external, doc)?;
        }
        Ok(external)
    }

    /// Insert a batch, returning the assigned ids in order.
    pub fn insert_multiple(&mut self, docs: Vec<Document>) -> Result<Vec<String>> {
        for hook in &self.components.before_insert_multiple {
            hook(&docs)?;
        }

        let mut ids = Vec::with_capacity(docs.len());
        for doc in docs {
            let external = self.extract_id(&doc);
            ids.push(self.insert_with_id(external, doc)?);
        }

        for hook in &self.components.after_insert_multiple {
            hook(&ids)?;
        }
        Ok(ids)
    }

    /// Remove a document. Unknown ids are a silent no-op returning `false`.
    pub fn remove(&mut self, external: &str) -> Result<bool> {
        let Some(internal) = self.id_store.get(external) else {
            warn!("remove of unknown document '{}'", external);
            return Ok(false);
        };
        if !self.docs.contains(internal) {
            warn!("remove of already removed document '{}'", external);
            return Ok(false);
        }

        for hook in &self.components.before_remove {
            hook(external)?;
        }

        let doc = self.docs.remove(internal).expect("presence checked above");
        self.unindex_document(internal, &doc)?;
        debug!("removed document '{}' (internal id {})", external, internal.0);

        for hook in &self.components.after_remove {
            hook(external)?;
        }
        Ok(true)
    }

    /// Remove a batch; returns how many documents actually existed.
    pub fn remove_multiple(&mut self, externals: &[String]) -> Result<usize> {
        for hook in &self.components.before_remove_multiple {
            hook(externals)?;
        }

        let mut removed = 0;
        for external in externals {
            if self.remove(external)? {
                removed += 1;
            }
        }

        for hook in &self.components.after_remove_multiple {
            hook(externals)?;
        }
        Ok(removed)
    }

    /// Replace a document under the same external id. Inserts when the id
    /// was never seen.
    pub fn update(&mut self, external: &str, doc: Document) -> Result<String> {
        for hook in &self.components.before_update {
            hook(external, &doc)?;
        }

        self.remove(external)?;
        let id = self.insert_with_id(external.to_string(), doc)?;

        for hook in &self.components.after_update {
            let internal = self.id_store.get(&id).expect("document just inserted");
            let doc = self.docs.get(internal).expect("document just stored");
            hook(&id, doc)?;
        }
        Ok(id)
    }

    /// Update a batch, returning the ids in order.
    pub fn update_multiple(
        &mut self,
        externals: &[String],
        docs: Vec<Document>,
    ) -> Result<Vec<String>> {
        for hook in &self.components.before_update_multiple {
            hook(&docs)?;
        }

        let mut ids = Vec::with_capacity(docs.len());
        for (external, doc) in externals.iter().zip(docs) {
            ids.push(self.update(external, doc)?);
        }

        for hook in &self.components.after_update_multiple {
            hook(&ids)?;
        }
        Ok(ids)
    }

    /// Run a search request.
    pub fn search(&self, params: &SearchParams) -> Result<SearchResults> {
        crate::search::searcher::execute(self, params)
    }

    /// Fetch a stored document by external id.
    pub fn get_document(&self, external: &str) -> Option<&Document> {
        let internal = self.id_store.get(external)?;
        self.docs.get(internal)
    }

    fn extract_id(&self, doc: &Document) -> String {
        if let Some(extractor) = &self.components.get_document_id {
            if let Some(id) = extractor(doc) {
                return id;
            }
        }
        match doc.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        }
    }

    fn index_document(&mut self, internal: DocId, doc: &Document) -> Result<()> {
        for (prop, field_type) in self.schema.properties() {
            let Some(value) = get_nested(doc, prop) else {
                continue;
            };
            if !value_matches_type(value, *field_type) {
                warn!("skipping '{}': value does not match type {}", prop, field_type);
                continue;
            }

            self.index.insert(prop, internal, value, self.analyzer.as_ref())?;
            if !field_type.is_array() {
                if let Some(sort_value) = to_sort_value(value) {
                    self.sorter.get_mut().insert(prop, internal, sort_value);
                }
            }
        }
        Ok(())
    }

    fn unindex_document(&mut self, internal: DocId, doc: &Document) -> Result<()> {
        for (prop, field_type) in self.schema.properties() {
            let Some(value) = get_nested(doc, prop) else {
                continue;
            };
            if !value_matches_type(value, *field_type) {
                continue;
            }

            self.index.remove(prop, internal, value, self.analyzer.as_ref())?;
            if !field_type.is_array() {
                self.sorter.get_mut().remove(prop, internal);
            }
        }
        Ok(())
    }
}

fn to_sort_value(value: &Value) -> Option<SortValue> {
    match value {
        Value::String(s) => Some(SortValue::Str(s.clone())),
        Value::Number(n) => n.as_f64().map(SortValue::Num),
        Value::Bool(b) => Some(SortValue::Bool(*b)),
        _ => None,
    }
}
