use std::collections::HashMap;

use crate::core::types::{DocId, Document};

/// Internal id → document bag.
///
/// The engine treats documents as opaque: this store only hands them back
/// for hit materialization and re-tokenization on removal.
#[derive(Debug, Default)]
pub struct DocumentStore {
    pub docs: HashMap<DocId, Document>,
    pub count: usize,
}

impl DocumentStore {
    pub fn new() -> Self {
        DocumentStore {
            docs: HashMap::new(),
            count: 0,
        }
    }

    pub fn insert(&mut self, id: DocId, doc: Document) {
        if self.docs.insert(id, doc).is_none() {
            self.count += 1;
        }
    }

    pub fn remove(&mut self, id: DocId) -> Option<Document> {
        let removed = self.docs.remove(&id);
        if removed.is_some() {
            self.count -= 1;
        }
        removed
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.docs.get(&id)
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.docs.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
