use serde::{Deserialize, Serialize};

use crate::core::types::DocId;

/// Boolean index: one bucket of internal ids per truth value.
///
/// Removal is a linear scan; with only two buckets there is nothing to
/// gain from a cleverer structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoolIndex {
    pub true_docs: Vec<DocId>,
    pub false_docs: Vec<DocId>,
}

impl BoolIndex {
    pub fn new() -> Self {
        BoolIndex {
            true_docs: Vec::new(),
            false_docs: Vec::new(),
        }
    }

    pub fn insert(&mut self, value: bool, doc_id: DocId) {
        let bucket = if value {
            &mut self.true_docs
        } else {
            &mut self.false_docs
        };
        if !bucket.contains(&doc_id) {
            bucket.push(doc_id);
        }
    }

    pub fn remove(&mut self, value: bool, doc_id: DocId) -> bool {
        let bucket = if value {
            &mut self.true_docs
        } else {
            &mut self.false_docs
        };
        let before = bucket.len();
        bucket.retain(|d| *d != doc_id);
        bucket.len() != before
    }

    pub fn get(&self, value: bool) -> &[DocId] {
        if value {
            &self.true_docs
        } else {
            &self.false_docs
        }
    }

    pub fn is_empty(&self) -> bool {
        self.true_docs.is_empty() && self.false_docs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_are_independent() {
        let mut index = BoolIndex::new();
        index.insert(true, DocId(1));
        index.insert(false, DocId(2));
        index.insert(true, DocId(3));

        assert_eq!(index.get(true), &[DocId(1), DocId(3)]);
        assert_eq!(index.get(false), &[DocId(2)]);
    }

    #[test]
    fn insert_is_idempotent_per_value() {
        let mut index = BoolIndex::new();
        index.insert(true, DocId(1));
        index.insert(true, DocId(1));
        assert_eq!(index.get(true), &[DocId(1)]);
    }

    #[test]
    fn remove_scans_the_right_bucket() {
        let mut index = BoolIndex::new();
        index.insert(true, DocId(1));
        index.insert(false, DocId(1));

        assert!(index.remove(true, DocId(1)));
        assert!(!index.remove(true, DocId(1)));
        assert_eq!(index.get(false), &[DocId(1)]);
    }
}
