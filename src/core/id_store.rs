use std::collections::HashMap;

use crate::core::types::DocId;

/// Interns external document ids into dense internal ids.
///
/// The first interned id is 1. A mapping, once created, lives for the
/// lifetime of the store: removal never frees an id, so internal ids are
/// never reused and stay stable across save/load.
#[derive(Debug, Default)]
pub struct IdStore {
    pub id_map: HashMap<String, DocId>,
    pub internal_id_to_id: Vec<String>, // index i holds the external id for DocId(i + 1)
}

impl IdStore {
    pub fn new() -> Self {
        IdStore {
            id_map: HashMap::new(),
            internal_id_to_id: Vec::new(),
        }
    }

    /// Rebuild from the persisted external-id vector.
    pub fn from_internal_ids(internal_id_to_id: Vec<String>) -> Self {
        let id_map = internal_id_to_id
            .iter()
            .enumerate()
            .map(|(i, external)| (external.clone(), DocId(i as u32 + 1)))
            .collect();

        IdStore {
            id_map,
            internal_id_to_id,
        }
    }

    /// Get the internal id for an external id, allocating on first use.
    pub fn intern(&mut self, external: &str) -> DocId {
        if let Some(id) = self.id_map.get(external) {
            return *id;
        }

        let id = DocId(self.internal_id_to_id.len() as u32 + 1);
        self.internal_id_to_id.push(external.to_string());
        self.id_map.insert(external.to_string(), id);
        id
    }

    pub fn get(&self, external: &str) -> Option<DocId> {
        self.id_map.get(external).copied()
    }

    pub fn external_id(&self, id: DocId) -> Option<&str> {
        self.internal_id_to_id
            .get(id.0 as usize - 1)
            .map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.internal_id_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.internal_id_to_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_start_at_one() {
        let mut store = IdStore::new();
        assert_eq!(store.intern("a"), DocId(1));
        assert_eq!(store.intern("b"), DocId(2));
        assert_eq!(store.intern("c"), DocId(3));
    }

    #[test]
    fn interning_is_idempotent() {
        let mut store = IdStore::new();
        let first = store.intern("doc-1");
        assert_eq!(store.intern("doc-1"), first);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn reverse_lookup() {
        let mut store = IdStore::new();
        let id = store.intern("doc-42");
        assert_eq!(store.external_id(id), Some("doc-42"));
        assert_eq!(store.external_id(DocId(99)), None);
    }

    #[test]
    fn restores_from_persisted_vector() {
        let store = IdStore::from_internal_ids(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(store.get("x"), Some(DocId(1)));
        assert_eq!(store.get("y"), Some(DocId(2)));
        assert_eq!(store.external_id(DocId(2)), Some("y"));
    }
}
