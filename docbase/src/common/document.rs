use crate::common::Value;
use crate::errors::{DocbaseError, DocbaseResult, ErrorKind};
use crate::ID_FIELD;
use indexmap::IndexMap;
use std::fmt::{Debug, Display, Formatter};

/// A flat, ordered collection of key-value pairs.
///
/// `Document` is the unit of persistence exchanged with the store boundary.
/// Keys are non-empty strings; values are [Value]s. Field order follows
/// insertion order and is preserved across round trips.
///
/// The `_id` field holds the document identifier as a string. Repositories
/// write it from the entity id; stores key documents by it.
///
/// Unlike a full document database, docbase documents are flat: there is no
/// dotted-path access into nested documents. A nested [Value::Document] is
/// read and written as a whole.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of fields in this document.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates a value with a key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the key is empty.
    pub fn put<T: Into<Value>>(&mut self, key: &str, value: T) -> DocbaseResult<()> {
        if key.is_empty() {
            log::error!("Document field key cannot be empty");
            return Err(DocbaseError::new(
                "Document field key cannot be empty",
                ErrorKind::InvalidArgument,
            ));
        }
        self.data.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Returns the value for a key, or [Value::Null] if the key is absent.
    pub fn get(&self, key: &str) -> Value {
        self.data.get(key).cloned().unwrap_or(Value::Null)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Removes a key, returning its value if it was present.
    ///
    /// Removal preserves the order of the remaining fields.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    /// Returns the document identifier stored under `_id`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidId` if the field is absent or not a string.
    pub fn id(&self) -> DocbaseResult<String> {
        match self.get(ID_FIELD) {
            Value::String(id) if !id.is_empty() => Ok(id),
            other => {
                log::error!("Document has no usable {} field: {:?}", ID_FIELD, other);
                Err(DocbaseError::new(
                    &format!("Document has no usable {} field", ID_FIELD),
                    ErrorKind::InvalidId,
                ))
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

/// Creates a [Document] from key-value literals.
///
/// Values may be any type convertible into [Value].
///
/// # Examples
///
/// ```rust,ignore
/// let doc = doc! {
///     "_id": "67332a5e9f1b2c3d4e5f6071",
///     "title": "Dune",
///     "pages": 412,
/// };
/// ```
#[macro_export]
macro_rules! doc {
    () => {
        $crate::common::Document::new()
    };
    ($($key:literal : $value:expr),* $(,)?) => {{
        let mut doc = $crate::common::Document::new();
        $(
            doc.put($key, $value)
                .expect(concat!("Failed to put field ", $key, " in document"));
        )*
        doc
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_and_get() {
        let mut doc = Document::new();
        doc.put("name", "Alice").unwrap();
        doc.put("age", 30i64).unwrap();
        assert_eq!(doc.get("name"), Value::String("Alice".to_string()));
        assert_eq!(doc.get("age"), Value::I64(30));
        assert_eq!(doc.get("missing"), Value::Null);
        assert_eq!(doc.size(), 2);
    }

    #[test]
    fn put_rejects_empty_key() {
        let mut doc = Document::new();
        let result = doc.put("", 1i32);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidArgument);
    }

    #[test]
    fn put_replaces_existing_value() {
        let mut doc = Document::new();
        doc.put("count", 1i32).unwrap();
        doc.put("count", 2i32).unwrap();
        assert_eq!(doc.get("count"), Value::I32(2));
        assert_eq!(doc.size(), 1);
    }

    #[test]
    fn remove_preserves_order() {
        let mut doc = doc! { "a": 1i32, "b": 2i32, "c": 3i32 };
        assert_eq!(doc.remove("b"), Some(Value::I32(2)));
        let keys: Vec<&String> = doc.keys().collect();
        assert_eq!(keys, vec!["a", "c"]);
        assert_eq!(doc.remove("b"), None);
    }

    #[test]
    fn id_reads_id_field() {
        let doc = doc! { "_id": "67332a5e9f1b2c3d4e5f6071", "name": "x" };
        assert_eq!(doc.id().unwrap(), "67332a5e9f1b2c3d4e5f6071");
    }

    #[test]
    fn id_fails_when_absent_or_wrong_type() {
        let doc = doc! { "name": "x" };
        assert_eq!(doc.id().unwrap_err().kind(), &ErrorKind::InvalidId);

        let doc = doc! { "_id": 42i64 };
        assert_eq!(doc.id().unwrap_err().kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn doc_macro_builds_document() {
        let doc = doc! { "name": "Bob", "active": true };
        assert_eq!(doc.size(), 2);
        assert_eq!(doc.get("active"), Value::Bool(true));

        let empty = doc! {};
        assert!(empty.is_empty());
    }

    #[test]
    fn display_formats_in_order() {
        let doc = doc! { "a": 1i32, "b": "x" };
        assert_eq!(format!("{}", doc), "{a: 1, b: x}");
    }
}
