use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dense internal document id.
///
/// Assigned by the [`IdStore`](crate::core::id_store::IdStore) on first
/// interning of an external id. Ids start at 1 and are never reused, so 0
/// is free to act as a sentinel in serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub u32);

impl DocId {
    pub fn new(id: u32) -> Self {
        DocId(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

/// A document is an opaque JSON object; the engine only ever reads the
/// properties named by the schema.
pub type Document = serde_json::Map<String, Value>;

/// Resolve a dotted path (`"meta.rating"`) against a document.
pub fn get_nested<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = doc.get(first)?;

    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }

    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn nested_path_resolution() {
        let d = doc(json!({"title": "ok", "meta": {"rating": 4.5, "flags": {"new": true}}}));
        assert_eq!(get_nested(&d, "title"), Some(&json!("ok")));
        assert_eq!(get_nested(&d, "meta.rating"), Some(&json!(4.5)));
        assert_eq!(get_nested(&d, "meta.flags.new"), Some(&json!(true)));
        assert_eq!(get_nested(&d, "meta.missing"), None);
        assert_eq!(get_nested(&d, "title.deeper"), None);
    }
}
