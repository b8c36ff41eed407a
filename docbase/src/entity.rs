use crate::common::{DocId, Document};
use crate::errors::{DocbaseError, DocbaseResult, ErrorKind};
use chrono::{DateTime, Utc};

/// Bidirectional conversion between an entity and a [Document].
///
/// `to_document` writes every persisted field, with the entity id stored
/// under `_id`. `from_document` rebuilds the entity from those fields and
/// reports any missing or mistyped field as `ObjectMappingError`.
///
/// Usually implemented with `#[derive(Mappable)]` from the `docbase_derive`
/// crate rather than by hand.
pub trait Mappable: Sized {
    fn to_document(&self) -> DocbaseResult<Document>;

    fn from_document(document: &Document) -> DocbaseResult<Self>;
}

/// The contract a type must satisfy to be managed by a repository.
///
/// An entity names its collection, declares its key format, and exposes its
/// id and audit timestamps through accessors the repository drives:
///
/// * `set_id` is called on insert when the entity has no id yet and the key
///   format can generate one.
/// * `set_created_at` is stamped once on insert and never touched again.
/// * `set_updated_at` is stamped on insert and on every update.
///
/// Usually implemented with `#[derive(Entity)]` from the `docbase_derive`
/// crate.
pub trait Entity: Mappable + Clone + Send + Sync + 'static {
    /// The id format this entity uses; see [NativeKey] and [StringKey].
    type Key: KeyFormat;

    /// The name of the collection holding entities of this type.
    fn collection_name() -> String;

    /// The entity id, or `None` when not yet persisted.
    fn id(&self) -> Option<String>;

    fn set_id(&mut self, id: String);

    fn created_at(&self) -> Option<DateTime<Utc>>;

    fn set_created_at(&mut self, at: DateTime<Utc>);

    fn updated_at(&self) -> Option<DateTime<Utc>>;

    fn set_updated_at(&mut self, at: DateTime<Utc>);
}

/// Id format of an entity type, fixed at compile time.
///
/// The repository consults the key format in exactly two places: validating
/// ids that cross the API boundary, and generating an id when an entity is
/// inserted without one.
pub trait KeyFormat: Send + Sync + 'static {
    /// Checks that an id string is well formed for this format.
    fn validate(id: &str) -> DocbaseResult<()>;

    /// Produces a fresh id.
    fn generate() -> String;
}

/// Store-native keys in [DocId] shape.
///
/// Ids are 24-character hex strings; the repository generates one on insert
/// when the entity carries none. Malformed ids are rejected at the API
/// boundary with `InvalidId`.
pub struct NativeKey;

impl KeyFormat for NativeKey {
    fn validate(id: &str) -> DocbaseResult<()> {
        DocId::from_hex(id).map(|_| ())
    }

    fn generate() -> String {
        DocId::new().to_hex()
    }
}

/// Caller-supplied string keys.
///
/// Any non-empty string is a valid id. Entities inserted without one get a
/// generated [DocId] hex string, which is a valid string key like any other.
pub struct StringKey;

impl KeyFormat for StringKey {
    fn validate(id: &str) -> DocbaseResult<()> {
        if id.is_empty() {
            log::error!("String key cannot be empty");
            return Err(DocbaseError::new(
                "String key cannot be empty",
                ErrorKind::InvalidId,
            ));
        }
        Ok(())
    }

    fn generate() -> String {
        DocId::new().to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_key_validates_hex_shape() {
        assert!(NativeKey::validate("67332a5e9f1b2c3d4e5f6071").is_ok());

        let result = NativeKey::validate("not-a-doc-id");
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn native_key_generates_valid_ids() {
        let id = NativeKey::generate();
        assert!(NativeKey::validate(&id).is_ok());
    }

    #[test]
    fn string_key_accepts_any_non_empty_string() {
        assert!(StringKey::validate("user:42").is_ok());
        assert!(StringKey::validate("x").is_ok());

        let result = StringKey::validate("");
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn string_key_generated_ids_are_valid() {
        let id = StringKey::generate();
        assert!(StringKey::validate(&id).is_ok());
    }
}
