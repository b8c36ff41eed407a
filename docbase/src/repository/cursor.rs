use crate::entity::Entity;
use crate::errors::DocbaseResult;
use crate::filter::Filter;
use crate::store::DocumentCursor;
use std::marker::PhantomData;

/// A lazy stream of typed entities.
///
/// Wraps a [DocumentCursor] and converts each document through
/// [crate::entity::Mappable] as it is pulled. Additional filters attached
/// with [EntityCursor::filter] are evaluated lazily, per document, without
/// another store round trip.
pub struct EntityCursor<T: Entity> {
    cursor: DocumentCursor,
    filters: Vec<Filter>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> EntityCursor<T> {
    pub(crate) fn new(cursor: DocumentCursor) -> Self {
        EntityCursor {
            cursor,
            filters: Vec::new(),
            _entity: PhantomData,
        }
    }

    /// Narrows the cursor with another filter, applied lazily during
    /// iteration.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Consumes the cursor and returns its first entity, if any.
    pub fn first(mut self) -> DocbaseResult<Option<T>> {
        self.next().transpose()
    }
}

impl<T: Entity> Iterator for EntityCursor<T> {
    type Item = DocbaseResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        'documents: loop {
            let document = match self.cursor.next()? {
                Ok(document) => document,
                Err(error) => return Some(Err(error)),
            };
            for filter in &self.filters {
                match filter.apply(&document) {
                    Ok(true) => {}
                    Ok(false) => continue 'documents,
                    Err(error) => return Some(Err(error)),
                }
            }
            return Some(T::from_document(&document));
        }
    }
}
