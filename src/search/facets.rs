use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::store::DocumentStore;
use crate::core::types::{get_nested, DocId, Document};
use crate::schema::schema::FieldType;
use crate::search::params::{FacetDefinition, GroupByParams, SortOrder};
use crate::search::results::FacetResult;

const DEFAULT_FACET_LIMIT: usize = 10;
const DEFAULT_GROUP_SIZE: usize = 10;

/// Count facet values over the filtered (pre-pagination) hit set.
pub fn compute_facets(
    definitions: &HashMap<String, FacetDefinition>,
    hits: &[(DocId, f64)],
    docs: &DocumentStore,
    property_types: &HashMap<String, FieldType>,
) -> Result<HashMap<String, FacetResult>> {
    let mut out = HashMap::new();

    for (prop, definition) in definitions {
        let field_type = property_types.get(prop).ok_or_else(|| {
            Error::new(
                ErrorKind::UnknownFilterProperty,
                format!("unknown facet property '{}'", prop),
            )
        })?;

        let facet = match field_type.scalar() {
            FieldType::Number => number_facet(prop, definition, hits, docs),
            FieldType::String => string_facet(prop, definition, hits, docs),
            FieldType::Boolean => boolean_facet(prop, hits, docs),
            _ => unreachable!(),
        };
        out.insert(prop.clone(), facet);
    }

    Ok(out)
}

fn scalar_values<'a>(doc: &'a Document, prop: &str) -> Vec<&'a Value> {
    match get_nested(doc, prop) {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
        None => Vec::new(),
    }
}

fn string_facet(
    prop: &str,
    definition: &FacetDefinition,
    hits: &[(DocId, f64)],
    docs: &DocumentStore,
) -> FacetResult {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for (id, _) in hits {
        let Some(doc) = docs.get(*id) else { continue };
        for value in scalar_values(doc, prop) {
            if let Some(s) = value.as_str() {
                *counts.entry(s.to_string()).or_insert(0) += 1;
            }
        }
    }

    let total = counts.len();
    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    match definition.sort.unwrap_or(SortOrder::Desc) {
        SortOrder::Desc => pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0))),
        SortOrder::Asc => pairs.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0))),
    }

    let offset = definition.offset.unwrap_or(0);
    let limit = definition.limit.unwrap_or(DEFAULT_FACET_LIMIT);
    let values = pairs.into_iter().skip(offset).take(limit).collect();

    FacetResult {
        count: total,
        values,
    }
}

fn number_facet(
    prop: &str,
    definition: &FacetDefinition,
    hits: &[(DocId, f64)],
    docs: &DocumentStore,
) -> FacetResult {
    let ranges = definition.ranges.as_deref().unwrap_or_default();
    let mut values: BTreeMap<String, usize> = ranges
        .iter()
        .map(|r| (format!("{}-{}", r.from, r.to), 0))
        .collect();

    for (id, _) in hits {
        let Some(doc) = docs.get(*id) else { continue };
        for value in scalar_values(doc, prop) {
            let Some(n) = value.as_f64() else { continue };
            for range in ranges {
                if n >= range.from && n <= range.to {
                    let key = format!("{}-{}", range.from, range.to);
                    *values.get_mut(&key).unwrap() += 1;
                }
            }
        }
    }

    FacetResult {
        count: values.len(),
        values,
    }
}

fn boolean_facet(prop: &str, hits: &[(DocId, f64)], docs: &DocumentStore) -> FacetResult {
    let mut values: BTreeMap<String, usize> = BTreeMap::new();
    values.insert("false".to_string(), 0);
    values.insert("true".to_string(), 0);

    for (id, _) in hits {
        let Some(doc) = docs.get(*id) else { continue };
        for value in scalar_values(doc, prop) {
            if let Some(b) = value.as_bool() {
                let key = if b { "true" } else { "false" };
                *values.get_mut(key).unwrap() += 1;
            }
        }
    }

    FacetResult {
        count: values.len(),
        values,
    }
}

/// Bucket score-ordered hits by the values of the grouping properties.
///
/// Groups appear in discovery order; each keeps its top `max_result` hits.
pub fn compute_groups(
    params: &GroupByParams,
    hits: &[(DocId, f64)],
    docs: &DocumentStore,
    property_types: &HashMap<String, FieldType>,
) -> Result<Vec<(Vec<Value>, Vec<(DocId, f64)>)>> {
    for prop in &params.properties {
        if !property_types.contains_key(prop) {
            return Err(Error::new(
                ErrorKind::UnknownFilterProperty,
                format!("unknown groupBy property '{}'", prop),
            ));
        }
    }

    let max_result = params.max_result.unwrap_or(DEFAULT_GROUP_SIZE);
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, (Vec<Value>, Vec<(DocId, f64)>)> = HashMap::new();

    for (id, score) in hits {
        let Some(doc) = docs.get(*id) else { continue };

        let values: Vec<Value> = params
            .properties
            .iter()
            .map(|prop| get_nested(doc, prop).cloned().unwrap_or(Value::Null))
            .collect();
        if values.iter().any(|v| v.is_null()) {
            continue;
        }

        let key = serde_json::to_string(&values).unwrap_or_default();
        let entry = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            (values, Vec::new())
        });
        if entry.1.len() < max_result {
            entry.1.push((*id, *score));
        }
    }

    Ok(order
        .into_iter()
        .map(|key| groups.remove(&key).unwrap())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::params::NumberRange;
    use serde_json::json;

    fn store(entries: &[(u32, Value)]) -> DocumentStore {
        let mut docs = DocumentStore::new();
        for (id, value) in entries {
            docs.insert(DocId(*id), value.as_object().unwrap().clone());
        }
        docs
    }

    fn types() -> HashMap<String, FieldType> {
        [
            ("category".to_string(), FieldType::String),
            ("price".to_string(), FieldType::Number),
            ("in_stock".to_string(), FieldType::Boolean),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn string_facet_counts_and_sorts_by_count() {
        let docs = store(&[
            (1, json!({"category": "fiction"})),
            (2, json!({"category": "fiction"})),
            (3, json!({"category": "poetry"})),
        ]);
        let hits = vec![(DocId(1), 1.0), (DocId(2), 0.5), (DocId(3), 0.2)];
        let defs: HashMap<String, FacetDefinition> =
            [("category".to_string(), FacetDefinition::default())]
                .into_iter()
                .collect();

        let facets = compute_facets(&defs, &hits, &docs, &types()).unwrap();
        let facet = &facets["category"];
        assert_eq!(facet.count, 2);
        assert_eq!(facet.values["fiction"], 2);
        assert_eq!(facet.values["poetry"], 1);
    }

    #[test]
    fn number_facet_buckets_inclusive_ranges() {
        let docs = store(&[
            (1, json!({"price": 10})),
            (2, json!({"price": 25})),
            (3, json!({"price": 25.5})),
        ]);
        let hits = vec![(DocId(1), 1.0), (DocId(2), 1.0), (DocId(3), 1.0)];
        let defs: HashMap<String, FacetDefinition> = [(
            "price".to_string(),
            FacetDefinition {
                ranges: Some(vec![
                    NumberRange { from: 0.0, to: 20.0 },
                    NumberRange {
                        from: 20.0,
                        to: 30.0,
                    },
                ]),
                ..FacetDefinition::default()
            },
        )]
        .into_iter()
        .collect();

        let facets = compute_facets(&defs, &hits, &docs, &types()).unwrap();
        let facet = &facets["price"];
        assert_eq!(facet.values["0-20"], 1);
        assert_eq!(facet.values["20-30"], 2);
    }

    #[test]
    fn unknown_facet_property_fails() {
        let docs = store(&[(1, json!({"category": "x"}))]);
        let defs: HashMap<String, FacetDefinition> =
            [("nope".to_string(), FacetDefinition::default())]
                .into_iter()
                .collect();
        let err = compute_facets(&defs, &[], &docs, &types()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownFilterProperty);
    }

    #[test]
    fn groups_preserve_score_order_and_cap_size() {
        let docs = store(&[
            (1, json!({"category": "a"})),
            (2, json!({"category": "a"})),
            (3, json!({"category": "b"})),
        ]);
        let hits = vec![(DocId(1), 3.0), (DocId(2), 2.0), (DocId(3), 1.0)];
        let params = GroupByParams {
            properties: vec!["category".to_string()],
            max_result: Some(1),
        };

        let groups = compute_groups(&params, &hits, &docs, &types()).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, vec![json!("a")]);
        assert_eq!(groups[0].1, vec![(DocId(1), 3.0)]);
        assert_eq!(groups[1].0, vec![json!("b")]);
    }
}
