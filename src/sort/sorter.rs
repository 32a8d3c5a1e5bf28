use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::language::Language;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocId;
use crate::schema::schema::{FieldType, Schema};
use crate::search::params::{SortByParams, SortOrder};

/// A sortable scalar value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortValue {
    Str(String),
    Num(f64),
    Bool(bool),
}

/// Per-property ordering state.
///
/// `docs` maps an id to its position in `ordered_docs` and is only valid
/// while `sorted` holds. Removals land in `pending_remove` and are applied
/// on the next sort, so deleting is O(1).
#[derive(Debug)]
pub struct PropertySort {
    pub docs: HashMap<DocId, usize>,
    pub ordered_docs: Vec<(DocId, SortValue)>,
    pub pending_remove: HashSet<DocId>,
    pub sorted: bool,
    pub field_type: FieldType,
}

impl PropertySort {
    pub fn new(field_type: FieldType) -> Self {
        PropertySort {
            docs: HashMap::new(),
            ordered_docs: Vec::new(),
            pending_remove: HashSet::new(),
            sorted: true,
            field_type,
        }
    }
}

/// Maintains lazily-sorted document orderings for the scalar schema paths.
#[derive(Debug)]
pub struct Sorter {
    pub enabled: bool,
    pub is_sorted: bool,
    pub language: Language,
    pub sortable_properties: Vec<String>,
    pub sortable_properties_with_types: HashMap<String, FieldType>,
    pub sorts: HashMap<String, PropertySort>,
}

impl Sorter {
    /// Build from the schema's scalar paths minus `unsortable_properties`.
    pub fn from_schema(
        schema: &Schema,
        enabled: bool,
        unsortable_properties: &[String],
        language: Language,
    ) -> Sorter {
        let mut sorter = Sorter {
            enabled,
            is_sorted: true,
            language,
            sortable_properties: Vec::new(),
            sortable_properties_with_types: HashMap::new(),
            sorts: HashMap::new(),
        };

        if !enabled {
            return sorter;
        }

        for (path, field_type) in schema.scalar_properties() {
            if unsortable_properties.iter().any(|p| p == path) {
                continue;
            }
            sorter.sortable_properties.push(path.to_string());
            sorter
                .sortable_properties_with_types
                .insert(path.to_string(), field_type);
            sorter
                .sorts
                .insert(path.to_string(), PropertySort::new(field_type));
        }
        sorter
    }

    /// Record a document's value for a property. No-op when disabled or
    /// the property is not sortable.
    pub fn insert(&mut self, prop: &str, doc_id: DocId, value: SortValue) {
        if !self.enabled {
            return;
        }
        let Some(sort) = self.sorts.get_mut(prop) else {
            return;
        };

        sort.docs.insert(doc_id, sort.ordered_docs.len());
        sort.ordered_docs.push((doc_id, value));
        sort.sorted = false;
        self.is_sorted = false;
    }

    /// Mark a document for removal. Deferred: the entry stays in
    /// `ordered_docs` until the next sort, so repeated removals are O(1).
    pub fn remove(&mut self, prop: &str, doc_id: DocId) {
        if !self.enabled {
            return;
        }
        let Some(sort) = self.sorts.get_mut(prop) else {
            return;
        };

        // Position 0 is a valid entry; only absence skips the removal.
        if sort.docs.remove(&doc_id).is_none() {
            return;
        }
        sort.pending_remove.insert(doc_id);
    }

    /// Reorder `results` by the property's value order.
    ///
    /// Hits without an entry for the property keep their relative order and
    /// sort after every indexed hit.
    pub fn sort_by(&mut self, results: &mut [(DocId, f64)], params: &SortByParams) -> Result<()> {
        if !self.enabled {
            return Err(Error::new(
                ErrorKind::SortDisabled,
                "sorting was disabled at creation".to_string(),
            ));
        }
        if !self.sorts.contains_key(&params.property) {
            return Err(Error::new(
                ErrorKind::UnableToSortOnUnknownField,
                format!("'{}' is not a sortable property", params.property),
            ));
        }

        self.ensure_sorted(&params.property);
        let sort = &self.sorts[&params.property];

        results.sort_by(|(a, _), (b, _)| {
            match (sort.docs.get(a), sort.docs.get(b)) {
                (Some(pa), Some(pb)) => match params.order {
                    SortOrder::Asc => pa.cmp(pb),
                    SortOrder::Desc => pb.cmp(pa),
                },
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                // both un-indexed: stable sort keeps original order
                (None, None) => Ordering::Equal,
            }
        });
        Ok(())
    }

    /// Compact pending removals and re-sort one property if dirty.
    pub fn ensure_sorted(&mut self, prop: &str) {
        let language = self.language;
        let Some(sort) = self.sorts.get_mut(prop) else {
            return;
        };
        if sort.sorted {
            return;
        }

        if !sort.pending_remove.is_empty() {
            let pending = std::mem::take(&mut sort.pending_remove);
            sort.ordered_docs.retain(|(id, _)| !pending.contains(id));
        }

        sort.ordered_docs
            .sort_by(|(_, a), (_, b)| compare_values(a, b, language));

        sort.docs.clear();
        for (position, (id, _)) in sort.ordered_docs.iter().enumerate() {
            sort.docs.insert(*id, position);
        }
        sort.sorted = true;
    }

    /// Apply every pending removal and materialize every ordering; called
    /// before the state is persisted.
    pub fn flush(&mut self) {
        let properties: Vec<String> = self.sorts.keys().cloned().collect();
        for prop in properties {
            // A clean property with pending removals still needs compaction
            // before its ordered list can be saved.
            if let Some(sort) = self.sorts.get_mut(&prop) {
                if !sort.pending_remove.is_empty() {
                    sort.sorted = false;
                }
            }
            self.ensure_sorted(&prop);
        }
        self.is_sorted = true;
    }
}

/// Value comparison per type: strings lowercase through the language's
/// folding, numbers compare numerically, and `true` precedes `false`
/// ascending.
fn compare_values(a: &SortValue, b: &SortValue, language: Language) -> Ordering {
    match (a, b) {
        (SortValue::Str(a), SortValue::Str(b)) => {
            fold_for_compare(a, language).cmp(&fold_for_compare(b, language))
        }
        (SortValue::Num(a), SortValue::Num(b)) => a.total_cmp(b),
        (SortValue::Bool(a), SortValue::Bool(b)) => b.cmp(a),
        // mixed types cannot occur for a schema-typed property
        _ => Ordering::Equal,
    }
}

fn fold_for_compare(s: &str, language: Language) -> String {
    use crate::analysis::language::FoldedChar;

    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        for lowered in c.to_lowercase() {
            match language.fold_char(lowered) {
                FoldedChar::One(f) => out.push(f),
                FoldedChar::Two(x, y) => {
                    out.push(x);
                    out.push(y);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sorter() -> Sorter {
        let schema = Schema::parse(&json!({
            "title": "string",
            "price": "number",
            "in_stock": "boolean",
            "tags": "string[]"
        }))
        .unwrap();
        Sorter::from_schema(&schema, true, &[], Language::English)
    }

    fn ids(results: &[(DocId, f64)]) -> Vec<u32> {
        results.iter().map(|(id, _)| id.0).collect()
    }

    #[test]
    fn array_properties_are_not_sortable() {
        let s = sorter();
        assert!(s.sorts.contains_key("title"));
        assert!(!s.sorts.contains_key("tags"));
    }

    #[test]
    fn numeric_ascending_and_descending() {
        let mut s = sorter();
        s.insert("price", DocId(1), SortValue::Num(30.0));
        s.insert("price", DocId(2), SortValue::Num(10.0));
        s.insert("price", DocId(3), SortValue::Num(20.0));

        let mut results = vec![(DocId(1), 0.0), (DocId(2), 0.0), (DocId(3), 0.0)];
        s.sort_by(
            &mut results,
            &SortByParams {
                property: "price".to_string(),
                order: SortOrder::Asc,
            },
        )
        .unwrap();
        assert_eq!(ids(&results), vec![2, 3, 1]);

        s.sort_by(
            &mut results,
            &SortByParams {
                property: "price".to_string(),
                order: SortOrder::Desc,
            },
        )
        .unwrap();
        assert_eq!(ids(&results), vec![1, 3, 2]);
    }

    #[test]
    fn string_sort_ignores_case_and_diacritics() {
        let mut s = sorter();
        s.insert("title", DocId(1), SortValue::Str("Zebra".to_string()));
        s.insert("title", DocId(2), SortValue::Str("épée".to_string()));
        s.insert("title", DocId(3), SortValue::Str("apple".to_string()));

        let mut results = vec![(DocId(1), 0.0), (DocId(2), 0.0), (DocId(3), 0.0)];
        s.sort_by(
            &mut results,
            &SortByParams {
                property: "title".to_string(),
                order: SortOrder::Asc,
            },
        )
        .unwrap();
        assert_eq!(ids(&results), vec![3, 2, 1]);
    }

    #[test]
    fn true_precedes_false_ascending() {
        let mut s = sorter();
        s.insert("in_stock", DocId(1), SortValue::Bool(false));
        s.insert("in_stock", DocId(2), SortValue::Bool(true));

        let mut results = vec![(DocId(1), 0.0), (DocId(2), 0.0)];
        s.sort_by(
            &mut results,
            &SortByParams {
                property: "in_stock".to_string(),
                order: SortOrder::Asc,
            },
        )
        .unwrap();
        assert_eq!(ids(&results), vec![2, 1]);
    }

    #[test]
    fn unindexed_hits_sort_last_in_original_order() {
        let mut s = sorter();
        s.insert("price", DocId(1), SortValue::Num(5.0));

        let mut results = vec![(DocId(9), 0.0), (DocId(8), 0.0), (DocId(1), 0.0)];
        s.sort_by(
            &mut results,
            &SortByParams {
                property: "price".to_string(),
                order: SortOrder::Asc,
            },
        )
        .unwrap();
        assert_eq!(ids(&results), vec![1, 9, 8]);
    }

    #[test]
    fn positions_rebuild_after_lazy_sort() {
        let mut s = sorter();
        s.insert("price", DocId(1), SortValue::Num(3.0));
        s.insert("price", DocId(2), SortValue::Num(1.0));
        s.ensure_sorted("price");

        let sort = &s.sorts["price"];
        for (position, (id, _)) in sort.ordered_docs.iter().enumerate() {
            assert_eq!(sort.docs[id], position);
        }
        // Position 0 must be treated as present.
        let first = sort.ordered_docs[0].0;
        assert_eq!(sort.docs.get(&first), Some(&0));
    }

    #[test]
    fn deferred_removal_applies_on_next_sort() {
        let mut s = sorter();
        s.insert("price", DocId(1), SortValue::Num(1.0));
        s.insert("price", DocId(2), SortValue::Num(2.0));
        s.ensure_sorted("price");

        s.remove("price", DocId(1));
        // Entry still physically present until the next sort.
        assert_eq!(s.sorts["price"].ordered_docs.len(), 2);

        s.insert("price", DocId(3), SortValue::Num(0.5));
        s.ensure_sorted("price");
        let order: Vec<u32> = s.sorts["price"]
            .ordered_docs
            .iter()
            .map(|(id, _)| id.0)
            .collect();
        assert_eq!(order, vec![3, 2]);
    }

    #[test]
    fn removing_position_zero_works() {
        let mut s = sorter();
        s.insert("price", DocId(1), SortValue::Num(1.0));
        s.insert("price", DocId(2), SortValue::Num(2.0));
        s.ensure_sorted("price");
        assert_eq!(s.sorts["price"].docs[&DocId(1)], 0);

        s.remove("price", DocId(1));
        assert!(s.sorts["price"].pending_remove.contains(&DocId(1)));
    }

    #[test]
    fn double_remove_is_a_no_op() {
        let mut s = sorter();
        s.insert("price", DocId(1), SortValue::Num(1.0));
        s.ensure_sorted("price");
        s.remove("price", DocId(1));
        s.remove("price", DocId(1));
        assert_eq!(s.sorts["price"].pending_remove.len(), 1);
    }

    #[test]
    fn disabled_sorter_rejects_sort_by() {
        let schema = Schema::parse(&json!({"price": "number"})).unwrap();
        let mut s = Sorter::from_schema(&schema, false, &[], Language::English);
        s.insert("price", DocId(1), SortValue::Num(1.0)); // silent no-op

        let mut results = vec![(DocId(1), 0.0)];
        let err = s
            .sort_by(
                &mut results,
                &SortByParams {
                    property: "price".to_string(),
                    order: SortOrder::Asc,
                },
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::SortDisabled);
    }

    #[test]
    fn unknown_property_rejected() {
        let mut s = sorter();
        let mut results = vec![];
        let err = s
            .sort_by(
                &mut results,
                &SortByParams {
                    property: "tags".to_string(),
                    order: SortOrder::Asc,
                },
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnableToSortOnUnknownField);
    }

    #[test]
    fn unsortable_properties_are_excluded() {
        let schema = Schema::parse(&json!({"a": "number", "b": "number"})).unwrap();
        let s = Sorter::from_schema(&schema, true, &["b".to_string()], Language::English);
        assert!(s.sorts.contains_key("a"));
        assert!(!s.sorts.contains_key("b"));
    }

    #[test]
    fn flush_compacts_pending_removals() {
        let mut s = sorter();
        s.insert("price", DocId(1), SortValue::Num(1.0));
        s.insert("price", DocId(2), SortValue::Num(2.0));
        s.ensure_sorted("price");
        s.remove("price", DocId(2));

        s.flush();
        assert_eq!(s.sorts["price"].ordered_docs.len(), 1);
        assert!(s.sorts["price"].pending_remove.is_empty());
        assert!(s.is_sorted);
    }
}
