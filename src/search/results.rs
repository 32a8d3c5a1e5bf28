use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::Value;

use crate::core::types::Document;

/// Wall-clock time a search took.
#[derive(Debug, Clone, Serialize)]
pub struct Elapsed {
    pub raw: u64, // nanoseconds
    pub formatted: String,
}

/// One materialized search hit.
#[derive(Debug, Clone, Serialize)]
pub struct Hit {
    pub id: String, // external document id
    pub score: f64,
    pub document: Document,
}

/// Facet counts for one property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetResult {
    /// Number of distinct values (or buckets) observed.
    pub count: usize,
    pub values: BTreeMap<String, usize>,
}

/// One group of hits sharing the same property values.
#[derive(Debug, Clone, Serialize)]
pub struct GroupResult {
    pub values: Vec<Value>,
    pub result: Vec<Hit>,
}

/// Search response. `count` is the total number of matches before
/// pagination; `hits` is the requested page.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub elapsed: Elapsed,
    pub count: usize,
    pub hits: Vec<Hit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<HashMap<String, FacetResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<GroupResult>>,
}

/// Render elapsed nanoseconds for humans.
pub fn format_elapsed_time(ns: u64) -> String {
    if ns < 1_000 {
        format!("{}ns", ns)
    } else if ns < 1_000_000 {
        format!("{}μs", ns / 1_000)
    } else if ns < 1_000_000_000 {
        format!("{}ms", ns / 1_000_000)
    } else {
        format!("{:.2}s", ns as f64 / 1_000_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_formatting_scales_units() {
        assert_eq!(format_elapsed_time(512), "512ns");
        assert_eq!(format_elapsed_time(23_000), "23μs");
        assert_eq!(format_elapsed_time(7_000_000), "7ms");
        assert_eq!(format_elapsed_time(1_500_000_000), "1.50s");
    }
}
