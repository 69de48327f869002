//! Native ordered document tree.
//!
//! The interchange shape between script values and the JSON collaborator.
//! Independent of the runtime: a `Document` never holds a script handle.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Document {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Array(Vec<Document>),
    Object(DocumentMap),
}

impl Document {
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Null => "null",
            Document::Bool(_) => "boolean",
            Document::Int(_) => "integer",
            Document::UInt(_) => "unsigned",
            Document::Float(_) => "float",
            Document::String(_) => "string",
            Document::Array(_) => "array",
            Document::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Document]> {
        match self {
            Document::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&DocumentMap> {
        match self {
            Document::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` when this is an object.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Nesting depth; scalars are depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Document::Array(items) => 1 + items.iter().map(Document::depth).max().unwrap_or(0),
            Document::Object(map) => 1 + map.values().map(Document::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

impl From<bool> for Document {
    fn from(value: bool) -> Self {
        Document::Bool(value)
    }
}

impl From<i64> for Document {
    fn from(value: i64) -> Self {
        Document::Int(value)
    }
}

impl From<f64> for Document {
    fn from(value: f64) -> Self {
        Document::Float(value)
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Document::String(value.to_string())
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Document::String(value)
    }
}

impl From<Vec<Document>> for Document {
    fn from(value: Vec<Document>) -> Self {
        Document::Array(value)
    }
}

impl From<DocumentMap> for Document {
    fn from(value: DocumentMap) -> Self {
        Document::Object(value)
    }
}

/// String-keyed map that keeps insertion order.
///
/// Inserting an existing key replaces its value without moving it. Lookups go
/// through a key-to-position index, so building a map is linear in its size.
#[derive(Debug, Clone, Default)]
pub struct DocumentMap {
    entries: Vec<(String, Document)>,
    index: HashMap<String, usize>,
}

impl PartialEq for DocumentMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl DocumentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the previous value when `key` was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: Document) -> Option<Document> {
        let key = key.into();
        if let Some(&position) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &str) -> Option<&Document> {
        self.index
            .get(key)
            .and_then(|&position| self.entries.get(position))
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Document> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<K: Into<String>> FromIterator<(K, Document)> for DocumentMap {
    fn from_iter<I: IntoIterator<Item = (K, Document)>>(iter: I) -> Self {
        let mut map = DocumentMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for DocumentMap {
    type Item = (String, Document);
    type IntoIter = std::vec::IntoIter<(String, Document)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ============================================================================
// serde
// ============================================================================

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Document::Null => serializer.serialize_unit(),
            Document::Bool(value) => serializer.serialize_bool(*value),
            Document::Int(value) => serializer.serialize_i64(*value),
            Document::UInt(value) => serializer.serialize_u64(*value),
            Document::Float(value) => serializer.serialize_f64(*value),
            Document::String(value) => serializer.serialize_str(value),
            Document::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Document::Object(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for DocumentMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            out.serialize_entry(key, value)?;
        }
        out.end()
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Document, E> {
        Ok(Document::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Document, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Document, E> {
        Ok(Document::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Document, E> {
        Ok(Document::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Document, E> {
        Ok(Document::UInt(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Document, E> {
        Ok(Document::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Document, E> {
        Ok(Document::String(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Document, E> {
        Ok(Document::String(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Document, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Document::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Document, A::Error> {
        let mut map = DocumentMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Document>()? {
            map.insert(key, value);
        }
        Ok(Document::Object(map))
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DocumentVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position() {
        let mut map = DocumentMap::new();
        map.insert("b", Document::Int(1));
        map.insert("a", Document::Int(2));
        let previous = map.insert("b", Document::Int(3));

        assert_eq!(previous, Some(Document::Int(1)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(map.get("b"), Some(&Document::Int(3)));
    }

    #[test]
    fn test_wide_object_lookup() {
        let map: DocumentMap = (0..50_000)
            .map(|i| (format!("k{}", i), Document::Int(i)))
            .collect();
        assert_eq!(map.len(), 50_000);
        assert_eq!(map.get("k49999"), Some(&Document::Int(49_999)));
        assert_eq!(map.keys().nth(1), Some("k1"));

        let text = format!(
            "{{{}}}",
            (0..50_000).map(|i| format!("\"k{}\": {}", i, i)).collect::<Vec<_>>().join(",")
        );
        let parsed: Document = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.get("k12345"), Some(&Document::UInt(12_345)));
    }

    #[test]
    fn test_parse_keeps_order_and_last_duplicate() {
        let document: Document =
            serde_json::from_str(r#"{"z": 1, "a": -2, "m": 0.5, "z": true}"#).unwrap();
        let map = document.as_object().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(map.get("z"), Some(&Document::Bool(true)));
        assert_eq!(map.get("a"), Some(&Document::Int(-2)));
        assert_eq!(map.get("m"), Some(&Document::Float(0.5)));
    }

    #[test]
    fn test_unsigned_and_null() {
        let document: Document = serde_json::from_str("[18446744073709551615, null]").unwrap();
        assert_eq!(
            document,
            Document::Array(vec![Document::UInt(u64::MAX), Document::Null])
        );
    }

    #[test]
    fn test_non_finite_float_writes_null() {
        let text = serde_json::to_string(&Document::Float(f64::NAN)).unwrap();
        assert_eq!(text, "null");
    }

    #[test]
    fn test_depth() {
        let document: Document = serde_json::from_str(r#"{"a": [[1], {}]}"#).unwrap();
        assert_eq!(document.depth(), 3);
        assert_eq!(Document::from("x").depth(), 0);
    }
}
