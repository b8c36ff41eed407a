use crate::common::{CancellationToken, Clock, SortOrder};
use crate::entity::{Entity, KeyFormat};
use crate::errors::DocbaseResult;
use crate::filter::{all, by_id, Filter};
use crate::index::IndexDescriptor;
use crate::repository::{EntityCursor, RepositoryProvider};
use crate::store::{FindOptions, StoreCollection};
use std::marker::PhantomData;

/// The standard [RepositoryProvider] over one store collection and a clock.
///
/// Holds no state of its own beyond the two handles; all consistency is
/// whatever the store collection gives. Thread safety comes from the handles
/// being `Send + Sync`.
pub struct DefaultRepository<T: Entity> {
    collection: StoreCollection,
    clock: Clock,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> DefaultRepository<T> {
    pub(crate) fn new(collection: StoreCollection, clock: Clock) -> Self {
        DefaultRepository {
            collection,
            clock,
            _entity: PhantomData,
        }
    }

    // Id assignment and audit stamping shared by insert and insert_many.
    fn prepare_insert(&self, entity: &mut T) -> DocbaseResult<()> {
        match entity.id() {
            Some(id) if !id.is_empty() => T::Key::validate(&id)?,
            _ => entity.set_id(T::Key::generate()),
        }
        let now = self.clock.now();
        entity.set_created_at(now);
        entity.set_updated_at(now);
        Ok(())
    }
}

impl<T: Entity> RepositoryProvider<T> for DefaultRepository<T> {
    fn get_by_id(&self, id: &str) -> DocbaseResult<Option<T>> {
        T::Key::validate(id)?;
        let cursor = self
            .collection
            .find(&by_id(id), &FindOptions::new().limit_to(1))?;
        match cursor.first()? {
            Some(document) => Ok(Some(T::from_document(&document)?)),
            None => Ok(None),
        }
    }

    fn get_all(&self, token: &CancellationToken) -> DocbaseResult<EntityCursor<T>> {
        let cursor = self
            .collection
            .find(&all(), &FindOptions::new())?
            .with_cancellation(token.clone());
        Ok(EntityCursor::new(cursor))
    }

    fn find(&self, filter: Filter) -> DocbaseResult<EntityCursor<T>> {
        self.find_with_options(filter, &FindOptions::new())
    }

    fn find_with_options(
        &self,
        filter: Filter,
        options: &FindOptions,
    ) -> DocbaseResult<EntityCursor<T>> {
        log::debug!(
            "Finding in {} with filter {}",
            self.collection.name(),
            filter
        );
        let cursor = self.collection.find(&filter, options)?;
        Ok(EntityCursor::new(cursor))
    }

    fn insert(&self, entity: &mut T) -> DocbaseResult<()> {
        self.prepare_insert(entity)?;
        let document = entity.to_document()?;
        self.collection.insert_many(vec![document])?;
        Ok(())
    }

    fn insert_many(&self, entities: &mut [T]) -> DocbaseResult<()> {
        let mut documents = Vec::with_capacity(entities.len());
        for entity in entities.iter_mut() {
            self.prepare_insert(entity)?;
            documents.push(entity.to_document()?);
        }
        log::debug!(
            "Inserting {} documents into {}",
            documents.len(),
            self.collection.name()
        );
        self.collection.insert_many(documents)?;
        Ok(())
    }

    fn update(&self, entity: &mut T) -> DocbaseResult<()> {
        let id = match entity.id() {
            Some(id) if !id.is_empty() => id,
            // no identity yet, treat the update as a first insert
            _ => return self.insert(entity),
        };
        T::Key::validate(&id)?;
        entity.set_updated_at(self.clock.now());
        let document = entity.to_document()?;
        self.collection.replace_one(&by_id(&id), document, false)?;
        Ok(())
    }

    fn update_many(&self, entities: &mut [T]) -> DocbaseResult<()> {
        for entity in entities.iter_mut() {
            self.update(entity)?;
        }
        Ok(())
    }

    fn delete_by_id(&self, id: &str) -> DocbaseResult<u64> {
        T::Key::validate(id)?;
        self.collection.delete_many(&by_id(id))
    }

    fn delete(&self, entity: &T) -> DocbaseResult<u64> {
        match entity.id() {
            Some(id) if !id.is_empty() => self.delete_by_id(&id),
            _ => {
                log::warn!(
                    "Delete of entity without id in {}, nothing to do",
                    self.collection.name()
                );
                Ok(0)
            }
        }
    }

    fn delete_matching(&self, filter: Filter) -> DocbaseResult<u64> {
        log::debug!(
            "Deleting from {} with filter {}",
            self.collection.name(),
            filter
        );
        self.collection.delete_many(&filter)
    }

    fn delete_all(&self) -> DocbaseResult<()> {
        log::info!("Deleting all documents in {}", self.collection.name());
        self.collection.clear()
    }

    fn count(&self) -> DocbaseResult<u64> {
        self.collection.count(&all())
    }

    fn exists(&self, filter: Filter) -> DocbaseResult<bool> {
        let cursor = self
            .collection
            .find(&filter, &FindOptions::new().limit_to(1))?;
        Ok(cursor.first()?.is_some())
    }

    fn create_index(&self, field: &str, order: SortOrder) -> DocbaseResult<()> {
        self.collection.create_index(field, order)
    }

    fn drop_index(&self, field: &str) -> DocbaseResult<()> {
        self.collection.drop_index(field)
    }

    fn drop_indexes(&self, fields: &[&str]) -> DocbaseResult<()> {
        for field in fields {
            self.collection.drop_index(field)?;
        }
        Ok(())
    }

    fn drop_all_indexes(&self) -> DocbaseResult<()> {
        self.collection.drop_all_indexes()
    }

    fn list_indexes(&self) -> DocbaseResult<Vec<IndexDescriptor>> {
        self.collection.list_indexes()
    }

    fn paginate(
        &self,
        limit: u64,
        offset: u64,
        order_by: &str,
        order: SortOrder,
        token: &CancellationToken,
    ) -> DocbaseResult<EntityCursor<T>> {
        let options = FindOptions::new()
            .order_by(order_by, order)
            .skip_by(offset)
            .limit_to(limit);
        let cursor = self
            .collection
            .find(&all(), &options)?
            .with_cancellation(token.clone());
        Ok(EntityCursor::new(cursor))
    }

    fn collection(&self) -> StoreCollection {
        self.collection.clone()
    }
}
