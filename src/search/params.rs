use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::scoring::bm25::BM25Params;

/// Sort order for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc, // ascending: 0 → 9, a → z
    Desc, // descending: 9 → 0, z → a
}

/// How multi-term queries combine per-term id sets before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Union: a document matches if any term matches.
    #[default]
    Or,
    /// Intersection: a document must match every term.
    And,
}

/// One property's filter in a where-clause.
///
/// Untagged so the JSON forms read naturally: `true`, `"keyword"`,
/// `["a", "b"]`, or `{"between": [20, 40]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WhereFilter {
    Bool(bool),
    Str(String),
    StrList(Vec<String>),
    /// Comparison object; must hold exactly one known operator.
    Comparison(BTreeMap<String, ComparisonOperand>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ComparisonOperand {
    Value(f64),
    Range([f64; 2]),
}

/// Property path → filter. Empty means "no restriction".
pub type WhereClause = HashMap<String, WhereFilter>;

/// Sort request: order hits by a sortable property instead of score.
#[derive(Debug, Clone, Deserialize)]
pub struct SortByParams {
    pub property: String,
    #[serde(default)]
    pub order: SortOrder,
}

/// A numeric facet bucket, inclusive on both ends.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NumberRange {
    pub from: f64,
    pub to: f64,
}

/// Facet request for one property; interpretation follows the property's
/// schema type (ranges for numbers, value counts for strings/booleans).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FacetDefinition {
    pub ranges: Option<Vec<NumberRange>>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub sort: Option<SortOrder>, // by value count; default descending
}

/// Group request: bucket hits by the values of scalar properties.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupByParams {
    pub properties: Vec<String>,
    pub max_result: Option<usize>,
}

/// Full search request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    pub term: String,
    /// Restrict to these string properties; `None` searches all of them.
    pub properties: Option<Vec<String>>,
    pub exact: bool,
    /// `Some(0)` behaves like `exact`; absent selects prefix search.
    pub tolerance: Option<usize>,
    pub mode: SearchMode,
    /// Per-property score multipliers.
    pub boost: HashMap<String, f64>,
    pub relevance: BM25Params,
    pub limit: Option<usize>, // hits per page, default 10
    pub offset: usize,
    #[serde(rename = "where")]
    pub where_clause: WhereClause,
    pub sort_by: Option<SortByParams>,
    pub facets: Option<HashMap<String, FacetDefinition>>,
    pub group_by: Option<GroupByParams>,
}

impl SearchParams {
    /// A plain term query with defaults everywhere else.
    pub fn term(term: impl Into<String>) -> Self {
        SearchParams {
            term: term.into(),
            ..SearchParams::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn where_filter_forms_deserialize() {
        let clause: WhereClause = serde_json::from_value(json!({
            "inStock": true,
            "category": "fiction",
            "tags": ["a", "b"],
            "price": {"between": [20, 40]},
            "rating": {"gte": 4}
        }))
        .unwrap();

        assert!(matches!(clause["inStock"], WhereFilter::Bool(true)));
        assert!(matches!(clause["category"], WhereFilter::Str(_)));
        assert!(matches!(clause["tags"], WhereFilter::StrList(_)));
        assert!(matches!(clause["price"], WhereFilter::Comparison(_)));
        assert!(matches!(clause["rating"], WhereFilter::Comparison(_)));
    }

    #[test]
    fn search_params_from_json() {
        let params: SearchParams = serde_json::from_value(json!({
            "term": "hello",
            "tolerance": 1,
            "mode": "and",
            "sortBy": {"property": "price", "order": "DESC"},
            "where": {"inStock": true},
            "limit": 5
        }))
        .unwrap();

        assert_eq!(params.term, "hello");
        assert_eq!(params.tolerance, Some(1));
        assert_eq!(params.mode, SearchMode::And);
        assert_eq!(params.limit, Some(5));
        let sort_by = params.sort_by.unwrap();
        assert_eq!(sort_by.property, "price");
        assert_eq!(sort_by.order, SortOrder::Desc);
        assert_eq!(params.where_clause.len(), 1);
    }

    #[test]
    fn defaults_are_sensible() {
        let params = SearchParams::term("x");
        assert_eq!(params.mode, SearchMode::Or);
        assert!(!params.exact);
        assert_eq!(params.tolerance, None);
        assert_eq!(params.offset, 0);
        assert!(params.where_clause.is_empty());
    }
}
