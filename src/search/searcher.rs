use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

use log::debug;

use crate::core::database::Database;
use crate::core::error::Result;
use crate::core::types::DocId;
use crate::index::index::TermSearchParams;
use crate::schema::schema::FieldType;
use crate::search::facets::{compute_facets, compute_groups};
use crate::search::params::{SearchMode, SearchParams};
use crate::search::results::{format_elapsed_time, Elapsed, GroupResult, Hit, SearchResults};

const DEFAULT_LIMIT: usize = 10;

/// Run one search request against a database.
///
/// Tokenize, fan out per term and property, combine per the mode, filter,
/// order, paginate, materialize.
pub(crate) fn execute(db: &Database, params: &SearchParams) -> Result<SearchResults> {
    let start = Instant::now();

    let tokens = db.analyzer.analyze(&params.term);
    let properties = string_properties(db, params);
    debug!(
        "search: {} tokens over {} properties",
        tokens.len(),
        properties.len()
    );

    let docs_count = db.docs.len();
    let mut scores: HashMap<DocId, f64> = HashMap::new();
    let mut per_term_ids: Vec<HashSet<DocId>> = Vec::new();

    for token in &tokens {
        let mut ids_for_term = HashSet::new();
        for prop in &properties {
            let boost = params.boost.get(*prop).copied().unwrap_or(1.0);
            let term_hits = db.index.search(
                prop,
                token,
                &TermSearchParams {
                    exact: params.exact,
                    tolerance: params.tolerance,
                    relevance: &params.relevance,
                    docs_count,
                },
            )?;
            for (id, score) in term_hits {
                *scores.entry(id).or_insert(0.0) += score * boost;
                ids_for_term.insert(id);
            }
        }
        per_term_ids.push(ids_for_term);
    }

    if params.mode == SearchMode::And && per_term_ids.len() > 1 {
        scores.retain(|id, _| per_term_ids.iter().all(|set| set.contains(id)));
    }

    let filter = db
        .index
        .search_by_where_clause(&params.where_clause, db.analyzer.as_ref())?;

    // A termless query matches nothing on its own; with a where-clause it
    // degenerates to pure filtering, every candidate scoring zero.
    let mut results: Vec<(DocId, f64)> = if tokens.is_empty() {
        match &filter {
            Some(allowed) => allowed.iter().map(|raw| (DocId(raw), 0.0)).collect(),
            None => Vec::new(),
        }
    } else {
        if let Some(allowed) = &filter {
            scores.retain(|id, _| allowed.contains(id.0));
        }
        scores.into_iter().collect()
    };
    results.sort_by(|(id_a, score_a), (id_b, score_b)| {
        score_b
            .partial_cmp(score_a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| id_a.cmp(id_b))
    });
    let count = results.len();

    let facets = match &params.facets {
        Some(definitions) => Some(compute_facets(
            definitions,
            &results,
            &db.docs,
            &db.index.searchable_properties_with_types,
        )?),
        None => None,
    };

    let groups = match &params.group_by {
        Some(group_by) => {
            let raw_groups = compute_groups(
                group_by,
                &results,
                &db.docs,
                &db.index.searchable_properties_with_types,
            )?;
            Some(
                raw_groups
                    .into_iter()
                    .map(|(values, members)| GroupResult {
                        values,
                        result: members
                            .into_iter()
                            .map(|(id, score)| materialize(db, id, score))
                            .collect(),
                    })
                    .collect(),
            )
        }
        None => None,
    };

    if let Some(sort_by) = &params.sort_by {
        db.sorter.write().sort_by(&mut results, sort_by)?;
    }

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let hits: Vec<Hit> = results
        .into_iter()
        .skip(params.offset)
        .take(limit)
        .map(|(id, score)| materialize(db, id, score))
        .collect();

    let raw = start.elapsed().as_nanos() as u64;
    let formatted = match &db.components.format_elapsed_time {
        Some(formatter) => formatter(raw),
        None => format_elapsed_time(raw),
    };

    Ok(SearchResults {
        elapsed: Elapsed { raw, formatted },
        count,
        hits,
        facets,
        groups,
    })
}

/// The string-typed properties this request searches. Requested properties
/// that are not searchable strings are dropped.
fn string_properties<'a>(db: &'a Database, params: &'a SearchParams) -> Vec<&'a str> {
    let is_string = |prop: &str| {
        matches!(
            db.index
                .searchable_properties_with_types
                .get(prop)
                .map(|t| t.scalar()),
            Some(FieldType::String)
        )
    };

    match &params.properties {
        Some(requested) => requested
            .iter()
            .map(String::as_str)
            .filter(|p| is_string(p))
            .collect(),
        None => db
            .index
            .searchable_properties
            .iter()
            .map(String::as_str)
            .filter(|p| is_string(p))
            .collect(),
    }
}

fn materialize(db: &Database, id: DocId, score: f64) -> Hit {
    // Every scored id came out of the index, so both lookups are
    // structural invariants; a miss is a bug, not an input error.
    let external = db
        .id_store
        .external_id(id)
        .expect("indexed id missing from id store");
    let document = db.docs.get(id).expect("indexed id missing from doc store");

    Hit {
        id: external.to_string(),
        score,
        document: document.clone(),
    }
}
