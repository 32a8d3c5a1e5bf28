use std::collections::{BTreeMap, HashMap};

use levenshtein_automata::{Distance, LevenshteinAutomatonBuilder, DFA};
use serde::{Deserialize, Serialize};

use crate::core::types::DocId;

/// A node in the compressed trie.
///
/// `label` is the edge from the parent; children are keyed by the first
/// character of their label. A BTreeMap keeps traversal lexicographic,
/// which makes result ordering deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadixNode {
    pub label: String,
    pub end: bool,
    pub postings: HashMap<DocId, u32>, // id → occurrences of this term in the document's field
    pub children: BTreeMap<char, RadixNode>,
}

/// String term index: compressed trie with exact, prefix, and fuzzy lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadixTree {
    root: RadixNode,
}

/// Lookup parameters for [`RadixTree::find`].
#[derive(Debug, Clone, Copy)]
pub struct FindParams<'a> {
    pub term: &'a str,
    pub exact: bool,
    /// `None` selects plain prefix search; `Some(0)` behaves like `exact`.
    pub tolerance: Option<usize>,
}

impl RadixTree {
    pub fn new() -> Self {
        RadixTree {
            root: RadixNode::default(),
        }
    }

    /// Record one occurrence of `term` in `doc_id`'s field.
    pub fn insert(&mut self, term: &str, doc_id: DocId) {
        Self::insert_into(&mut self.root, term, doc_id);
    }

    fn insert_into(node: &mut RadixNode, term: &str, doc_id: DocId) {
        let Some(first) = term.chars().next() else {
            node.end = true;
            *node.postings.entry(doc_id).or_insert(0) += 1;
            return;
        };

        if !node.children.contains_key(&first) {
            let mut leaf = RadixNode {
                label: term.to_string(),
                end: true,
                ..RadixNode::default()
            };
            leaf.postings.insert(doc_id, 1);
            node.children.insert(first, leaf);
            return;
        }

        let child = node.children.get_mut(&first).unwrap();
        let common = common_prefix_len(&child.label, term);
        if common == child.label.len() {
            Self::insert_into(child, &term[common..], doc_id);
            return;
        }

        // The term diverges inside this edge: split it. Both subtrees hang
        // off a new intermediate node holding the shared prefix, so no
        // existing descendant moves.
        let mut old = node.children.remove(&first).unwrap();
        let shared = old.label[..common].to_string();
        old.label = old.label[common..].to_string();

        let mut mid = RadixNode {
            label: shared,
            ..RadixNode::default()
        };
        let old_first = old.label.chars().next().unwrap();
        mid.children.insert(old_first, old);

        let rest = &term[common..];
        if rest.is_empty() {
            mid.end = true;
            mid.postings.insert(doc_id, 1);
        } else {
            let mut leaf = RadixNode {
                label: rest.to_string(),
                end: true,
                ..RadixNode::default()
            };
            leaf.postings.insert(doc_id, 1);
            mid.children.insert(rest.chars().next().unwrap(), leaf);
        }
        node.children.insert(first, mid);
    }

    /// Exact-term posting lookup.
    pub fn find_exact(&self, term: &str) -> Option<&HashMap<DocId, u32>> {
        self.locate(term).filter(|n| n.end).map(|n| &n.postings)
    }

    /// Find matching terms and their posting ids.
    ///
    /// Results are `(matched_term, ids)` pairs. Exact lookups return at
    /// most one pair; prefix search returns every terminal under the term's
    /// subtree in lexicographic order; a non-zero tolerance returns every
    /// term whose prefix window is within that Levenshtein distance,
    /// ordered by ascending distance then term.
    pub fn find(&self, params: &FindParams) -> Vec<(String, Vec<DocId>)> {
        if params.exact || params.tolerance == Some(0) {
            return self
                .find_exact(params.term)
                .map(|postings| vec![(params.term.to_string(), sorted_ids(postings))])
                .unwrap_or_default();
        }

        match params.tolerance {
            Some(tolerance) => self.find_fuzzy(params.term, tolerance),
            None => self.find_prefix(params.term),
        }
    }

    fn find_prefix(&self, term: &str) -> Vec<(String, Vec<DocId>)> {
        let Some((node, prefix)) = self.locate_prefix(term) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        let mut word = prefix;
        Self::collect_words(node, &mut word, &mut |word, postings| {
            out.push((word.to_string(), sorted_ids(postings)));
        });
        out
    }

    fn find_fuzzy(&self, term: &str, tolerance: usize) -> Vec<(String, Vec<DocId>)> {
        // The prefix window of any term that extends `term` is `term`
        // itself (distance 0), so one pass over the whole tree covers both
        // the prefix matches and the fuzzy additions.
        let matcher = FuzzyMatcher::new(term, tolerance);
        let mut scored: Vec<(usize, String, Vec<DocId>)> = Vec::new();

        let mut word = String::new();
        Self::collect_words(&self.root, &mut word, &mut |word, postings| {
            if let Some(distance) = matcher.distance(word) {
                scored.push((distance, word.to_string(), sorted_ids(postings)));
            }
        });

        scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        scored
            .into_iter()
            .map(|(_, word, ids)| (word, ids))
            .collect()
    }

    /// Remove `doc_id` from `term`'s posting set, pruning emptied edges.
    pub fn remove_document(&mut self, term: &str, doc_id: DocId) -> bool {
        Self::remove_from(&mut self.root, term, doc_id)
    }

    fn remove_from(node: &mut RadixNode, term: &str, doc_id: DocId) -> bool {
        if term.is_empty() {
            if !node.end {
                return false;
            }
            let removed = node.postings.remove(&doc_id).is_some();
            if node.postings.is_empty() {
                node.end = false;
            }
            return removed;
        }

        let first = term.chars().next().unwrap();
        let Some(child) = node.children.get_mut(&first) else {
            return false;
        };
        let Some(rest) = term.strip_prefix(child.label.as_str()) else {
            return false;
        };

        let removed = Self::remove_from(child, rest, doc_id);
        if removed && !child.end && child.children.is_empty() {
            node.children.remove(&first);
        }
        removed
    }

    /// All terms currently in the tree, lexicographic.
    pub fn words(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut word = String::new();
        Self::collect_words(&self.root, &mut word, &mut |word, _| {
            out.push(word.to_string());
        });
        out
    }

    pub fn is_empty(&self) -> bool {
        !self.root.end && self.root.children.is_empty()
    }

    /// Walk edges consuming `term` exactly.
    fn locate(&self, term: &str) -> Option<&RadixNode> {
        let mut node = &self.root;
        let mut remaining = term;
        loop {
            if remaining.is_empty() {
                return Some(node);
            }
            let first = remaining.chars().next().unwrap();
            let child = node.children.get(&first)?;
            let rest = remaining.strip_prefix(child.label.as_str())?;
            node = child;
            remaining = rest;
        }
    }

    /// Walk as far as `term` reaches; also succeeds when the term ends
    /// inside an edge. Returns the subtree root and the word prefix
    /// accumulated down to it.
    fn locate_prefix(&self, term: &str) -> Option<(&RadixNode, String)> {
        let mut node = &self.root;
        let mut remaining = term;
        let mut acc = String::new();
        loop {
            if remaining.is_empty() {
                return Some((node, acc));
            }
            let first = remaining.chars().next().unwrap();
            let child = node.children.get(&first)?;
            if let Some(rest) = remaining.strip_prefix(child.label.as_str()) {
                acc.push_str(&child.label);
                node = child;
                remaining = rest;
            } else if child.label.starts_with(remaining) {
                acc.push_str(&child.label);
                return Some((child, acc));
            } else {
                return None;
            }
        }
    }

    fn collect_words(
        node: &RadixNode,
        word: &mut String,
        visit: &mut impl FnMut(&str, &HashMap<DocId, u32>),
    ) {
        if node.end {
            visit(word, &node.postings);
        }
        for child in node.children.values() {
            word.push_str(&child.label);
            Self::collect_words(child, word, visit);
            word.truncate(word.len() - child.label.len());
        }
    }
}

fn sorted_ids(postings: &HashMap<DocId, u32>) -> Vec<DocId> {
    let mut ids: Vec<DocId> = postings.keys().copied().collect();
    ids.sort_unstable();
    ids
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    let mut len = 0;
    let mut a_chars = a.chars();
    let mut b_chars = b.chars();
    loop {
        match (a_chars.next(), b_chars.next()) {
            (Some(x), Some(y)) if x == y => len += x.len_utf8(),
            _ => return len,
        }
    }
}

/// Matches candidate terms against a query term within an edit tolerance.
///
/// The distance is measured between the query and the candidate's prefix
/// window (its first `term.chars().count()` characters), so terms that
/// merely extend the query count as distance 0. Small tolerances go
/// through a Levenshtein DFA; larger ones fall back to a banded two-row
/// dynamic program.
struct FuzzyMatcher {
    term: String,
    term_chars: usize,
    tolerance: usize,
    dfa: Option<DFA>,
}

/// DFA construction cost grows steeply with the distance bound.
const MAX_DFA_TOLERANCE: usize = 3;

impl FuzzyMatcher {
    fn new(term: &str, tolerance: usize) -> Self {
        let dfa = if tolerance <= MAX_DFA_TOLERANCE {
            let builder = LevenshteinAutomatonBuilder::new(tolerance as u8, false);
            Some(builder.build_dfa(term))
        } else {
            None
        };

        FuzzyMatcher {
            term: term.to_string(),
            term_chars: term.chars().count(),
            tolerance,
            dfa,
        }
    }

    /// Distance to the word's prefix window, if within tolerance.
    fn distance(&self, word: &str) -> Option<usize> {
        let window = prefix_chars(word, self.term_chars);

        if let Some(dfa) = &self.dfa {
            let mut state = dfa.initial_state();
            for &byte in window.as_bytes() {
                state = dfa.transition(state, byte);
            }
            match dfa.distance(state) {
                Distance::Exact(d) => Some(d as usize),
                Distance::AtLeast(_) => None,
            }
        } else {
            bounded_levenshtein(&self.term, window, self.tolerance)
        }
    }
}

fn prefix_chars(word: &str, n: usize) -> &str {
    match word.char_indices().nth(n) {
        Some((i, _)) => &word[..i],
        None => word,
    }
}

/// Two-row Levenshtein with early exit once every cell exceeds the bound.
fn bounded_levenshtein(a: &str, b: &str, bound: usize) -> Option<usize> {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.len().abs_diff(b_chars.len()) > bound {
        return None;
    }
    if a_chars.is_empty() {
        return Some(b_chars.len());
    }
    if b_chars.is_empty() {
        return Some(a_chars.len());
    }

    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row = vec![0; b_chars.len() + 1];

    for (i, &ac) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        let mut min_in_row = curr_row[0];

        for (j, &bc) in b_chars.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
            min_in_row = min_in_row.min(curr_row[j + 1]);
        }

        if min_in_row > bound {
            return None;
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[b_chars.len()];
    (distance <= bound).then_some(distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(terms: &[(&str, u32)]) -> RadixTree {
        let mut tree = RadixTree::new();
        for (term, id) in terms {
            tree.insert(term, DocId(*id));
        }
        tree
    }

    #[test]
    fn exact_lookup() {
        let tree = tree(&[("hello", 1), ("help", 2), ("hello", 3)]);
        let postings = tree.find_exact("hello").unwrap();
        assert_eq!(postings.len(), 2);
        assert!(tree.find_exact("hel").is_none());
        assert!(tree.find_exact("helping").is_none());
    }

    #[test]
    fn occurrences_accumulate_per_document() {
        let mut tree = RadixTree::new();
        tree.insert("dog", DocId(1));
        tree.insert("dog", DocId(1));
        tree.insert("dog", DocId(2));
        let postings = tree.find_exact("dog").unwrap();
        assert_eq!(postings[&DocId(1)], 2);
        assert_eq!(postings[&DocId(2)], 1);
    }

    #[test]
    fn edge_split_preserves_existing_terms() {
        let tree = tree(&[("orama", 1), ("oranges", 2), ("oramatic", 3)]);
        assert_eq!(tree.find_exact("orama").unwrap().len(), 1);
        assert_eq!(tree.find_exact("oranges").unwrap().len(), 1);
        assert_eq!(tree.find_exact("oramatic").unwrap().len(), 1);
        assert_eq!(tree.words(), vec!["orama", "oramatic", "oranges"]);
    }

    #[test]
    fn prefix_search_returns_whole_subtree() {
        let tree = tree(&[("car", 1), ("cart", 2), ("carton", 3), ("dog", 4)]);
        let results = tree.find(&FindParams {
            term: "car",
            exact: false,
            tolerance: None,
        });
        let words: Vec<_> = results.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["car", "cart", "carton"]);
    }

    #[test]
    fn prefix_search_can_end_inside_an_edge() {
        let tree = tree(&[("carton", 1), ("cartoon", 2)]);
        let results = tree.find(&FindParams {
            term: "cart",
            exact: false,
            tolerance: None,
        });
        let words: Vec<_> = results.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["carton", "cartoon"]);
    }

    #[test]
    fn tolerance_zero_is_exact() {
        let tree = tree(&[("car", 1), ("cart", 2)]);
        let results = tree.find(&FindParams {
            term: "car",
            exact: false,
            tolerance: Some(0),
        });
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, "car");
    }

    #[test]
    fn fuzzy_orders_by_distance_then_term() {
        let tree = tree(&[("orama", 1), ("oramatic", 2), ("oranges", 3), ("panama", 4)]);
        let results = tree.find(&FindParams {
            term: "orama",
            exact: false,
            tolerance: Some(2),
        });
        let words: Vec<_> = results.iter().map(|(w, _)| w.as_str()).collect();
        // "orama" and "oramatic" have window distance 0, "oranges" 2;
        // "panama" is out of reach.
        assert_eq!(words, vec!["orama", "oramatic", "oranges"]);
    }

    #[test]
    fn fuzzy_matches_substitutions_anywhere() {
        let tree = tree(&[("hello", 1), ("jello", 2), ("world", 3)]);
        let results = tree.find(&FindParams {
            term: "hello",
            exact: false,
            tolerance: Some(1),
        });
        let words: Vec<_> = results.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(words, vec!["hello", "jello"]);
    }

    #[test]
    fn remove_prunes_emptied_leaves() {
        let mut tree = tree(&[("car", 1), ("cart", 2)]);
        assert!(tree.remove_document("cart", DocId(2)));
        assert!(tree.find_exact("cart").is_none());
        assert_eq!(tree.find_exact("car").unwrap().len(), 1);

        assert!(tree.remove_document("car", DocId(1)));
        assert!(tree.is_empty());
    }

    #[test]
    fn remove_unknown_is_a_no_op() {
        let mut tree = tree(&[("car", 1)]);
        assert!(!tree.remove_document("car", DocId(9)));
        assert!(!tree.remove_document("cart", DocId(1)));
        assert_eq!(tree.find_exact("car").unwrap().len(), 1);
    }

    #[test]
    fn bounded_levenshtein_agrees_with_expectations() {
        assert_eq!(bounded_levenshtein("kitten", "sitting", 3), Some(3));
        assert_eq!(bounded_levenshtein("kitten", "sitting", 2), None);
        assert_eq!(bounded_levenshtein("abc", "abc", 0), Some(0));
        assert_eq!(bounded_levenshtein("", "ab", 2), Some(2));
    }
}
