use crate::common::{Document, SortOrder};
use crate::errors::DocbaseResult;
use crate::filter::Filter;
use crate::index::IndexDescriptor;
use crate::store::{DocumentCursor, FindOptions};
use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::sync::Arc;

/// The driver-side contract for a connected store.
///
/// Everything the facade needs from a backend goes through this trait plus
/// [StoreCollectionProvider]. The bundled memory backend implements both;
/// external drivers plug in the same way.
pub trait StoreClientProvider: Send + Sync {
    /// Opens (creating if necessary) the named collection.
    fn collection(&self, name: &str) -> DocbaseResult<StoreCollection>;

    fn is_connected(&self) -> bool;

    /// Closes the connection. Further operations fail with
    /// `StoreUnavailable`.
    fn close(&self) -> DocbaseResult<()>;
}

/// A cloneable handle to a connected store client.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<dyn StoreClientProvider>,
}

impl StoreClient {
    pub fn new<T: StoreClientProvider + 'static>(inner: T) -> Self {
        StoreClient {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for StoreClient {
    type Target = Arc<dyn StoreClientProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Debug for StoreClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient")
            .field("connected", &self.inner.is_connected())
            .finish_non_exhaustive()
    }
}

/// The driver-side contract for one collection of documents.
///
/// Documents are keyed by their `_id` field. Collection order is insertion
/// order unless a find option says otherwise. All methods are blocking; the
/// facade adds no locking of its own on top.
pub trait StoreCollectionProvider: Send + Sync {
    fn name(&self) -> String;

    /// Finds documents matching a filter, shaped by options
    /// (sort, then skip, then limit).
    fn find(&self, filter: &Filter, options: &FindOptions) -> DocbaseResult<DocumentCursor>;

    /// Inserts a batch of documents, returning the number inserted.
    ///
    /// Every document must carry a `_id` not already present; a conflict
    /// fails the whole batch without inserting anything.
    fn insert_many(&self, documents: Vec<Document>) -> DocbaseResult<u64>;

    /// Replaces the first document matching the filter, returning the number
    /// of documents affected.
    ///
    /// A replaced document keeps its position in collection order. When
    /// nothing matches and `insert_if_absent` is set, the document is
    /// appended instead.
    fn replace_one(
        &self,
        filter: &Filter,
        document: Document,
        insert_if_absent: bool,
    ) -> DocbaseResult<u64>;

    /// Deletes every document matching the filter, returning the count.
    fn delete_many(&self, filter: &Filter) -> DocbaseResult<u64>;

    /// Counts documents matching the filter.
    fn count(&self, filter: &Filter) -> DocbaseResult<u64>;

    /// Removes every document. Indexes survive.
    fn clear(&self) -> DocbaseResult<()>;

    fn create_index(&self, field: &str, order: SortOrder) -> DocbaseResult<()>;

    fn drop_index(&self, field: &str) -> DocbaseResult<()>;

    fn drop_all_indexes(&self) -> DocbaseResult<()>;

    fn list_indexes(&self) -> DocbaseResult<Vec<IndexDescriptor>>;

    fn has_index(&self, field: &str) -> DocbaseResult<bool>;
}

/// A cloneable handle to a store collection.
#[derive(Clone)]
pub struct StoreCollection {
    inner: Arc<dyn StoreCollectionProvider>,
}

impl StoreCollection {
    pub fn new<T: StoreCollectionProvider + 'static>(inner: T) -> Self {
        StoreCollection {
            inner: Arc::new(inner),
        }
    }

    pub(crate) fn from_arc(inner: Arc<dyn StoreCollectionProvider>) -> Self {
        StoreCollection { inner }
    }
}

impl Deref for StoreCollection {
    type Target = Arc<dyn StoreCollectionProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Debug for StoreCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCollection")
            .field("name", &self.inner.name())
            .finish_non_exhaustive()
    }
}
