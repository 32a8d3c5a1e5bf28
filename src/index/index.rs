use std::collections::HashMap;

use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::analyzer::TextAnalysis;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocId;
use crate::index::avl::AvlTree;
use crate::index::boolean::BoolIndex;
use crate::index::radix::{FindParams, RadixTree};
use crate::schema::schema::{FieldType, Schema};
use crate::scoring::bm25::{bm25, BM25Params};
use crate::search::params::{ComparisonOperand, WhereClause, WhereFilter};

/// The structure backing one schema path; array types share the scalar
/// element's variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldIndex {
    Radix(RadixTree),
    Avl(AvlTree),
    Bool(BoolIndex),
}

/// Parameters for a single-term lookup against one property.
#[derive(Debug, Clone, Copy)]
pub struct TermSearchParams<'a> {
    pub exact: bool,
    pub tolerance: Option<usize>,
    pub relevance: &'a BM25Params,
    /// Corpus size, for the idf component.
    pub docs_count: usize,
}

/// Per-property index structures plus the BM25 bookkeeping that string
/// properties maintain.
#[derive(Debug, Default)]
pub struct Index {
    pub indexes: HashMap<String, FieldIndex>,
    pub searchable_properties: Vec<String>,
    pub searchable_properties_with_types: HashMap<String, FieldType>,
    /// property → document → term → normalized term frequency.
    pub frequencies: HashMap<String, HashMap<DocId, HashMap<String, f64>>>,
    /// property → term → number of documents containing it.
    pub token_occurrences: HashMap<String, HashMap<String, u32>>,
    /// property → mean token count over documents indexed there.
    pub avg_field_length: HashMap<String, f64>,
    /// property → document → token count.
    pub field_lengths: HashMap<String, HashMap<DocId, usize>>,
}

impl Index {
    pub fn from_schema(schema: &Schema) -> Index {
        let mut index = Index::default();
        for (path, field_type) in schema.properties() {
            index.add_property(path.clone(), *field_type);
        }
        index
    }

    fn add_property(&mut self, path: String, field_type: FieldType) {
        let structure = match field_type.scalar() {
            FieldType::String => FieldIndex::Radix(RadixTree::new()),
            FieldType::Number => FieldIndex::Avl(AvlTree::new()),
            FieldType::Boolean => FieldIndex::Bool(BoolIndex::new()),
            // scalar() never returns an array type
            _ => unreachable!(),
        };

        if field_type.scalar() == FieldType::String {
            self.frequencies.insert(path.clone(), HashMap::new());
            self.token_occurrences.insert(path.clone(), HashMap::new());
            self.avg_field_length.insert(path.clone(), 0.0);
            self.field_lengths.insert(path.clone(), HashMap::new());
        }

        self.indexes.insert(path.clone(), structure);
        self.searchable_properties_with_types
            .insert(path.clone(), field_type);
        self.searchable_properties.push(path);
    }

    /// Index one property of one document.
    pub fn insert(
        &mut self,
        prop: &str,
        doc_id: DocId,
        value: &Value,
        analyzer: &dyn TextAnalysis,
    ) -> Result<()> {
        let Some(field_type) = self.searchable_properties_with_types.get(prop).copied() else {
            return Ok(());
        };

        match field_type.scalar() {
            FieldType::String => {
                let tokens = Self::tokens_for(value, field_type, analyzer);
                self.insert_tokens(prop, doc_id, tokens);
            }
            FieldType::Number => {
                for number in Self::numbers_of(value, field_type) {
                    if let Some(FieldIndex::Avl(tree)) = self.indexes.get_mut(prop) {
                        tree.insert(number, doc_id);
                    }
                }
            }
            FieldType::Boolean => {
                for flag in Self::bools_of(value, field_type) {
                    if let Some(FieldIndex::Bool(buckets)) = self.indexes.get_mut(prop) {
                        buckets.insert(flag, doc_id);
                    }
                }
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    /// Un-index one property of one document, restoring every statistic to
    /// its pre-insert value.
    pub fn remove(
        &mut self,
        prop: &str,
        doc_id: DocId,
        value: &Value,
        analyzer: &dyn TextAnalysis,
    ) -> Result<()> {
        let Some(field_type) = self.searchable_properties_with_types.get(prop).copied() else {
            return Ok(());
        };

        match field_type.scalar() {
            FieldType::String => {
                let tokens = Self::tokens_for(value, field_type, analyzer);
                self.remove_tokens(prop, doc_id, tokens);
            }
            FieldType::Number => {
                for number in Self::numbers_of(value, field_type) {
                    if let Some(FieldIndex::Avl(tree)) = self.indexes.get_mut(prop) {
                        tree.remove_document(doc_id, number);
                    }
                }
            }
            FieldType::Boolean => {
                for flag in Self::bools_of(value, field_type) {
                    if let Some(FieldIndex::Bool(buckets)) = self.indexes.get_mut(prop) {
                        buckets.remove(flag, doc_id);
                    }
                }
            }
            _ => unreachable!(),
        }
        Ok(())
    }

    /// The document's token list for a string property; array elements
    /// contribute in order, so the field length is the total across them.
    fn tokens_for(value: &Value, field_type: FieldType, analyzer: &dyn TextAnalysis) -> Vec<String> {
        match field_type {
            FieldType::String => value
                .as_str()
                .map(|text| analyzer.analyze(text))
                .unwrap_or_default(),
            FieldType::StringArray => value
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| item.as_str())
                        .flat_map(|text| analyzer.analyze(text))
                        .collect()
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn numbers_of(value: &Value, field_type: FieldType) -> Vec<f64> {
        match field_type {
            FieldType::Number => value.as_f64().into_iter().collect(),
            FieldType::NumberArray => value
                .as_array()
                .map(|items| items.iter().filter_map(|item| item.as_f64()).collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn bools_of(value: &Value, field_type: FieldType) -> Vec<bool> {
        match field_type {
            FieldType::Boolean => value.as_bool().into_iter().collect(),
            FieldType::BooleanArray => value
                .as_array()
                .map(|items| items.iter().filter_map(|item| item.as_bool()).collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn insert_tokens(&mut self, prop: &str, doc_id: DocId, tokens: Vec<String>) {
        let lengths = self.field_lengths.get_mut(prop).unwrap();
        let docs_count = lengths.len() + 1;
        lengths.insert(doc_id, tokens.len());

        // Incremental mean; exact in real arithmetic, recomputed on save to
        // bound float drift.
        let avg = self.avg_field_length.get_mut(prop).unwrap();
        *avg = (*avg * (docs_count - 1) as f64 + tokens.len() as f64) / docs_count as f64;

        let mut counts: HashMap<&str, u32> = HashMap::new();
        for token in &tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }

        if let Some(FieldIndex::Radix(tree)) = self.indexes.get_mut(prop) {
            for token in &tokens {
                tree.insert(token, doc_id);
            }
        }

        let occurrences = self.token_occurrences.get_mut(prop).unwrap();
        let doc_frequencies = self
            .frequencies
            .get_mut(prop)
            .unwrap()
            .entry(doc_id)
            .or_default();
        for (token, count) in counts {
            doc_frequencies.insert(token.to_string(), count as f64 / tokens.len() as f64);
            *occurrences.entry(token.to_string()).or_insert(0) += 1;
        }
    }

    fn remove_tokens(&mut self, prop: &str, doc_id: DocId, tokens: Vec<String>) {
        let lengths = self.field_lengths.get_mut(prop).unwrap();
        let docs_count = lengths.len();
        let Some(removed_length) = lengths.remove(&doc_id) else {
            return;
        };

        let avg = self.avg_field_length.get_mut(prop).unwrap();
        if docs_count <= 1 {
            *avg = 0.0;
        } else {
            *avg = (*avg * docs_count as f64 - removed_length as f64) / (docs_count - 1) as f64;
        }

        self.frequencies.get_mut(prop).unwrap().remove(&doc_id);

        let mut distinct: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
        distinct.sort_unstable();
        distinct.dedup();

        let occurrences = self.token_occurrences.get_mut(prop).unwrap();
        for token in &distinct {
            if let Some(count) = occurrences.get_mut(*token) {
                *count -= 1;
                if *count == 0 {
                    occurrences.remove(*token);
                }
            }
        }

        if let Some(FieldIndex::Radix(tree)) = self.indexes.get_mut(prop) {
            for token in &distinct {
                tree.remove_document(token, doc_id);
            }
        }
    }

    /// Term lookup with BM25 scoring. Contributions from every matched
    /// term (prefix or fuzzy expansions included) sum per document.
    pub fn search(
        &self,
        prop: &str,
        term: &str,
        params: &TermSearchParams,
    ) -> Result<Vec<(DocId, f64)>> {
        let Some(FieldIndex::Radix(tree)) = self.indexes.get(prop) else {
            return Ok(Vec::new());
        };

        let matches = tree.find(&FindParams {
            term,
            exact: params.exact,
            tolerance: params.tolerance,
        });

        let frequencies = &self.frequencies[prop];
        let occurrences = &self.token_occurrences[prop];
        let lengths = &self.field_lengths[prop];
        let avg_length = self.avg_field_length[prop];

        let mut scores: HashMap<DocId, f64> = HashMap::new();
        for (word, ids) in matches {
            let df = occurrences.get(&word).copied().unwrap_or(0);
            for id in ids {
                let Some(tf) = frequencies.get(&id).and_then(|terms| terms.get(&word)) else {
                    continue;
                };
                let Some(field_length) = lengths.get(&id) else {
                    continue;
                };
                *scores.entry(id).or_insert(0.0) += bm25(
                    *tf,
                    df,
                    params.docs_count,
                    *field_length,
                    avg_length,
                    params.relevance,
                );
            }
        }

        Ok(scores.into_iter().collect())
    }

    /// Resolve a where-clause to the set of candidate ids, AND-ing the
    /// per-property sets. `None` means "no restriction".
    pub fn search_by_where_clause(
        &self,
        filters: &WhereClause,
        analyzer: &dyn TextAnalysis,
    ) -> Result<Option<RoaringBitmap>> {
        if filters.is_empty() {
            return Ok(None);
        }

        let mut result: Option<RoaringBitmap> = None;
        for (prop, filter) in filters {
            let structure = self.indexes.get(prop).ok_or_else(|| {
                Error::new(
                    ErrorKind::UnknownFilterProperty,
                    format!("unknown property '{}' in where clause", prop),
                )
            })?;

            let candidates = self.filter_candidates(prop, filter, structure, analyzer)?;
            result = Some(match result {
                None => candidates,
                Some(acc) => acc & candidates,
            });
        }
        Ok(result)
    }

    fn filter_candidates(
        &self,
        prop: &str,
        filter: &WhereFilter,
        structure: &FieldIndex,
        analyzer: &dyn TextAnalysis,
    ) -> Result<RoaringBitmap> {
        match (filter, structure) {
            (WhereFilter::Bool(value), FieldIndex::Bool(buckets)) => {
                Ok(buckets.get(*value).iter().map(|id| id.0).collect())
            }
            (WhereFilter::Str(value), FieldIndex::Radix(tree)) => {
                Ok(Self::string_candidates(tree, analyzer, std::slice::from_ref(value)))
            }
            (WhereFilter::StrList(values), FieldIndex::Radix(tree)) => {
                Ok(Self::string_candidates(tree, analyzer, values))
            }
            (WhereFilter::Comparison(operators), FieldIndex::Avl(tree)) => {
                if operators.len() != 1 {
                    return Err(Error::new(
                        ErrorKind::InvalidFilterOperation,
                        format!(
                            "expected exactly one operator for '{}', got {}",
                            prop,
                            operators.len()
                        ),
                    ));
                }
                let (operator, operand) = operators.iter().next().unwrap();
                let ids = Self::numeric_candidates(tree, prop, operator, operand)?;
                Ok(ids.iter().map(|id| id.0).collect())
            }
            _ => Err(Error::new(
                ErrorKind::InvalidFilterOperation,
                format!("filter does not match the type of property '{}'", prop),
            )),
        }
    }

    fn string_candidates(
        tree: &RadixTree,
        analyzer: &dyn TextAnalysis,
        values: &[String],
    ) -> RoaringBitmap {
        let mut out = RoaringBitmap::new();
        for value in values {
            for token in analyzer.analyze(value) {
                if let Some(postings) = tree.find_exact(&token) {
                    out.extend(postings.keys().map(|id| id.0));
                }
            }
        }
        out
    }

    fn numeric_candidates(
        tree: &AvlTree,
        prop: &str,
        operator: &str,
        operand: &ComparisonOperand,
    ) -> Result<Vec<DocId>> {
        match (operator, operand) {
            ("gt", ComparisonOperand::Value(v)) => Ok(tree.greater_than(*v, false)),
            ("gte", ComparisonOperand::Value(v)) => Ok(tree.greater_than(*v, true)),
            ("lt", ComparisonOperand::Value(v)) => Ok(tree.less_than(*v, false)),
            ("lte", ComparisonOperand::Value(v)) => Ok(tree.less_than(*v, true)),
            ("eq", ComparisonOperand::Value(v)) => {
                Ok(tree.find(*v).map(|ids| ids.to_vec()).unwrap_or_default())
            }
            ("between", ComparisonOperand::Range([min, max])) => Ok(tree.range_search(*min, *max)),
            _ => Err(Error::new(
                ErrorKind::InvalidFilterOperation,
                format!("invalid operator '{}' for property '{}'", operator, prop),
            )),
        }
    }
}
