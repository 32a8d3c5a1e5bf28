use std::collections::HashMap;
use std::io::{Read, Write};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{TextAnalyzer, TokenizerConfig};
use crate::analysis::language::Language;
use crate::core::config::Components;
use crate::core::database::Database;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::id_store::IdStore;
use crate::core::store::DocumentStore;
use crate::core::types::{DocId, Document};
use crate::index::index::{FieldIndex, Index};
use crate::schema::schema::{FieldType, Schema};
use crate::sort::sorter::{PropertySort, SortValue, Sorter};

/// Serialized form of the whole engine.
///
/// Integer-keyed maps become JSON objects whose string keys parse back to
/// integers, so the layout survives any JSON tooling in between.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub internal_document_id_store: IdStoreState,
    pub index: IndexState,
    pub sorter: SorterState,
    pub docs: DocsState,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdStoreState {
    pub internal_id_to_id: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexState {
    pub indexes: HashMap<String, FieldIndex>,
    pub searchable_properties: Vec<String>,
    pub searchable_properties_with_types: HashMap<String, FieldType>,
    pub frequencies: HashMap<String, HashMap<DocId, HashMap<String, f64>>>,
    pub token_occurrences: HashMap<String, HashMap<String, u32>>,
    pub avg_field_length: HashMap<String, f64>,
    pub field_lengths: HashMap<String, HashMap<DocId, usize>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SorterState {
    pub sortable_properties: Vec<String>,
    pub sortable_properties_with_types: HashMap<String, FieldType>,
    pub sorts: HashMap<String, PropertySortState>,
    pub enabled: bool,
    pub is_sorted: bool,
    pub language: Language,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySortState {
    pub docs: HashMap<DocId, usize>,
    pub ordered_docs: Vec<(DocId, SortValue)>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocsState {
    pub docs: HashMap<DocId, Document>,
    pub count: usize,
}

impl Database {
    /// Snapshot the engine state for persistence.
    ///
    /// The sorter is flushed first (pending deletions applied, orderings
    /// materialized) and field-length averages are recomputed from scratch
    /// to shed incremental-mean float drift.
    pub fn save_state(&self) -> Result<PersistedState> {
        let mut sorter = self.sorter.write();
        sorter.flush();

        let avg_field_length = self
            .index
            .field_lengths
            .iter()
            .map(|(prop, lengths)| {
                let avg = if lengths.is_empty() {
                    0.0
                } else {
                    lengths.values().sum::<usize>() as f64 / lengths.len() as f64
                };
                (prop.clone(), avg)
            })
            .collect();

        let sorts = sorter
            .sorts
            .iter()
            .map(|(prop, sort)| {
                (
                    prop.clone(),
                    PropertySortState {
                        docs: sort.docs.clone(),
                        ordered_docs: sort.ordered_docs.clone(),
                        field_type: sort.field_type,
                    },
                )
            })
            .collect();

        Ok(PersistedState {
            internal_document_id_store: IdStoreState {
                internal_id_to_id: self.id_store.internal_id_to_id.clone(),
            },
            index: IndexState {
                indexes: self.index.indexes.clone(),
                searchable_properties: self.index.searchable_properties.clone(),
                searchable_properties_with_types: self
                    .index
                    .searchable_properties_with_types
                    .clone(),
                frequencies: self.index.frequencies.clone(),
                token_occurrences: self.index.token_occurrences.clone(),
                avg_field_length,
                field_lengths: self.index.field_lengths.clone(),
            },
            sorter: SorterState {
                sortable_properties: sorter.sortable_properties.clone(),
                sortable_properties_with_types: sorter.sortable_properties_with_types.clone(),
                sorts,
                enabled: sorter.enabled,
                is_sorted: true,
                language: sorter.language,
            },
            docs: DocsState {
                docs: self.docs.docs.clone(),
                count: self.docs.count,
            },
        })
    }

    /// Rebuild a database from a snapshot.
    ///
    /// The analyzer is recreated from the persisted language with default
    /// settings; custom tokenizers and hooks are not part of the snapshot
    /// and must be re-attached by the host.
    pub fn from_state(state: PersistedState) -> Result<Database> {
        let language = state.sorter.language;

        let flattened: Vec<(String, FieldType)> = state
            .index
            .searchable_properties
            .iter()
            .map(|prop| {
                state
                    .index
                    .searchable_properties_with_types
                    .get(prop)
                    .map(|t| (prop.clone(), *t))
                    .ok_or_else(|| {
                        Error::new(
                            ErrorKind::Serialization,
                            format!("property '{}' has no persisted type", prop),
                        )
                    })
            })
            .collect::<Result<_>>()?;
        let schema = Schema::from_flattened(flattened);

        let analyzer = TextAnalyzer::from_config(&TokenizerConfig {
            language,
            ..TokenizerConfig::default()
        })?;

        let index = Index {
            indexes: state.index.indexes,
            searchable_properties: state.index.searchable_properties,
            searchable_properties_with_types: state.index.searchable_properties_with_types,
            frequencies: state.index.frequencies,
            token_occurrences: state.index.token_occurrences,
            avg_field_length: state.index.avg_field_length,
            field_lengths: state.index.field_lengths,
        };

        let sorts = state
            .sorter
            .sorts
            .into_iter()
            .map(|(prop, sort)| {
                let mut restored = PropertySort::new(sort.field_type);
                restored.docs = sort.docs;
                restored.ordered_docs = sort.ordered_docs;
                (prop, restored)
            })
            .collect();
        let sorter = Sorter {
            enabled: state.sorter.enabled,
            is_sorted: state.sorter.is_sorted,
            language,
            sortable_properties: state.sorter.sortable_properties,
            sortable_properties_with_types: state.sorter.sortable_properties_with_types,
            sorts,
        };

        Ok(Database {
            id: uuid::Uuid::new_v4().to_string(),
            schema,
            language,
            analyzer: Box::new(analyzer),
            index,
            sorter: RwLock::new(sorter),
            docs: DocumentStore {
                docs: state.docs.docs,
                count: state.docs.count,
            },
            id_store: IdStore::from_internal_ids(
                state.internal_document_id_store.internal_id_to_id,
            ),
            components: Components::default(),
        })
    }

    /// Serialize the snapshot as JSON.
    pub fn save_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let state = self.save_state()?;
        serde_json::to_writer(writer, &state)?;
        Ok(())
    }

    /// Rebuild from JSON produced by [`Database::save_to_writer`].
    pub fn load_from_reader<R: Read>(reader: R) -> Result<Database> {
        let state: PersistedState = serde_json::from_reader(reader)?;
        Database::from_state(state)
    }
}
