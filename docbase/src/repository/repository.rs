use crate::common::{CancellationToken, SortOrder};
use crate::entity::Entity;
use crate::errors::DocbaseResult;
use crate::filter::Filter;
use crate::index::IndexDescriptor;
use crate::repository::{EntityCursor, RepositoryBuilder};
use crate::store::{FindOptions, StoreCollection};
use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::sync::Arc;

/// The operations a repository offers over one entity type.
///
/// Implementations delegate persistence to a store collection; the facade's
/// own logic is limited to id handling, timestamp stamping, and entity to
/// document conversion. Every operation is a blocking call and every store
/// failure propagates to the caller unchanged.
pub trait RepositoryProvider<T: Entity>: Send + Sync {
    /// Fetches one entity by id.
    ///
    /// Ids failing the entity's key format are `InvalidId`; an id that is
    /// valid but absent is `Ok(None)`, not an error.
    fn get_by_id(&self, id: &str) -> DocbaseResult<Option<T>>;

    /// Streams every entity in collection order.
    ///
    /// The stream is lazy and unbounded; bounding it is the caller's
    /// responsibility. The token cancels mid-fetch.
    fn get_all(&self, token: &CancellationToken) -> DocbaseResult<EntityCursor<T>>;

    /// Streams entities matching a filter.
    fn find(&self, filter: Filter) -> DocbaseResult<EntityCursor<T>>;

    /// Streams entities matching a filter, shaped by find options.
    fn find_with_options(
        &self,
        filter: Filter,
        options: &FindOptions,
    ) -> DocbaseResult<EntityCursor<T>>;

    /// Persists a new entity.
    ///
    /// An empty id gets a generated one; `created_at` and `updated_at` are
    /// both stamped to the injected clock's now. The assigned id and
    /// timestamps are visible on the caller's value afterwards.
    fn insert(&self, entity: &mut T) -> DocbaseResult<()>;

    /// Persists a batch of new entities in one store call.
    ///
    /// Stamping happens per entity first; a batch failure is a single
    /// aggregate error with no per-entity reporting.
    fn insert_many(&self, entities: &mut [T]) -> DocbaseResult<()>;

    /// Replaces the stored entity with the same id.
    ///
    /// An entity without an id routes to [RepositoryProvider::insert]
    /// instead. Otherwise `updated_at` is stamped (`created_at` is left
    /// alone) and the document is replaced keyed on `_id`; replacing zero
    /// documents is not an error.
    fn update(&self, entity: &mut T) -> DocbaseResult<()>;

    /// Updates entities one by one; no cross-batch atomicity.
    fn update_many(&self, entities: &mut [T]) -> DocbaseResult<()>;

    /// Deletes by id, returning the number of documents removed.
    fn delete_by_id(&self, id: &str) -> DocbaseResult<u64>;

    /// Deletes the stored entity with this entity's id.
    fn delete(&self, entity: &T) -> DocbaseResult<u64>;

    /// Deletes every entity matching a filter in one bulk store call.
    fn delete_matching(&self, filter: Filter) -> DocbaseResult<u64>;

    /// Unconditionally removes every entity. Irreversible.
    fn delete_all(&self) -> DocbaseResult<()>;

    /// Counts all entities in the collection.
    fn count(&self) -> DocbaseResult<u64>;

    /// Checks whether at least one entity matches a filter.
    fn exists(&self, filter: Filter) -> DocbaseResult<bool>;

    fn create_index(&self, field: &str, order: SortOrder) -> DocbaseResult<()>;

    fn drop_index(&self, field: &str) -> DocbaseResult<()>;

    fn drop_indexes(&self, fields: &[&str]) -> DocbaseResult<()>;

    fn drop_all_indexes(&self) -> DocbaseResult<()>;

    fn list_indexes(&self) -> DocbaseResult<Vec<IndexDescriptor>>;

    /// Streams one page: sorted by the caller-supplied field, then offset,
    /// then limited.
    fn paginate(
        &self,
        limit: u64,
        offset: u64,
        order_by: &str,
        order: SortOrder,
        token: &CancellationToken,
    ) -> DocbaseResult<EntityCursor<T>>;

    /// The underlying store collection, for raw document-level access.
    fn collection(&self) -> StoreCollection;
}

/// A cloneable, typed repository handle.
///
/// # Examples
///
/// ```rust,ignore
/// let repo: Repository<Book> = Repository::builder().build()?;
///
/// let mut book = Book::new("Dune", 1965);
/// repo.insert(&mut book)?;
/// let found = repo.get_by_id(&book.id)?;
/// ```
pub struct Repository<T: Entity> {
    inner: Arc<dyn RepositoryProvider<T>>,
}

impl<T: Entity> Repository<T> {
    pub fn new<P: RepositoryProvider<T> + 'static>(inner: P) -> Self {
        Repository {
            inner: Arc::new(inner),
        }
    }

    /// Starts a fluent builder for this entity type.
    pub fn builder() -> RepositoryBuilder<T> {
        RepositoryBuilder::new()
    }
}

impl<T: Entity> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Repository {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Entity> Deref for Repository<T> {
    type Target = Arc<dyn RepositoryProvider<T>>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T: Entity> Debug for Repository<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository").finish_non_exhaustive()
    }
}
