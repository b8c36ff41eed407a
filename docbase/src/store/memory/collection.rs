use crate::common::{Document, SortOrder};
use crate::errors::{DocbaseError, DocbaseResult, ErrorKind};
use crate::filter::{is_all_filter, Filter};
use crate::index::IndexDescriptor;
use crate::store::{DocumentCursor, FindOptions, StoreCollectionProvider};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicBool};
use std::sync::Arc;

/// One in-memory collection: documents keyed by `_id` in insertion order.
///
/// Filters evaluate client-side against each document. Index management only
/// records descriptors; queries never consult them.
pub(crate) struct MemoryCollection {
    name: String,
    connected: Arc<AtomicBool>,
    data: RwLock<IndexMap<String, Document>>,
    indexes: RwLock<IndexMap<String, IndexDescriptor>>,
}

impl MemoryCollection {
    pub(crate) fn new(name: &str, connected: Arc<AtomicBool>) -> Self {
        MemoryCollection {
            name: name.to_string(),
            connected,
            data: RwLock::new(IndexMap::new()),
            indexes: RwLock::new(IndexMap::new()),
        }
    }

    fn check_connected(&self) -> DocbaseResult<()> {
        if !self.connected.load(atomic::Ordering::SeqCst) {
            log::error!("Operation on collection {} after close", self.name);
            return Err(DocbaseError::new(
                "Store connection is closed",
                ErrorKind::StoreUnavailable,
            ));
        }
        Ok(())
    }
}

// Unordered value pairs sort as equal, keeping the scan order stable.
fn compare_by_field(a: &Document, b: &Document, field: &str, order: SortOrder) -> Ordering {
    let ordering = a
        .get(field)
        .partial_cmp(&b.get(field))
        .unwrap_or(Ordering::Equal);
    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

impl StoreCollectionProvider for MemoryCollection {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn find(&self, filter: &Filter, options: &FindOptions) -> DocbaseResult<DocumentCursor> {
        self.check_connected()?;
        let data = self.data.read();

        let mut matched = Vec::new();
        for document in data.values() {
            if filter.apply(document)? {
                matched.push(document.clone());
            }
        }
        drop(data);

        if let Some((field, order)) = options.sort_by() {
            matched.sort_by(|a, b| compare_by_field(a, b, field, *order));
        }

        let skip = options.skip().unwrap_or(0) as usize;
        let documents: Vec<Document> = match options.limit() {
            Some(limit) => matched.into_iter().skip(skip).take(limit as usize).collect(),
            None => matched.into_iter().skip(skip).collect(),
        };
        Ok(DocumentCursor::from_documents(documents))
    }

    fn insert_many(&self, documents: Vec<Document>) -> DocbaseResult<u64> {
        self.check_connected()?;
        let mut data = self.data.write();

        // validate the whole batch before touching the collection
        let mut ids = Vec::with_capacity(documents.len());
        for document in &documents {
            let id = document.id()?;
            if data.contains_key(&id) || ids.contains(&id) {
                log::error!("Duplicate id {} in collection {}", id, self.name);
                return Err(DocbaseError::new(
                    &format!("Duplicate id {} in collection {}", id, self.name),
                    ErrorKind::StoreOperationFailed,
                ));
            }
            ids.push(id);
        }

        let count = documents.len() as u64;
        for (id, document) in ids.into_iter().zip(documents) {
            data.insert(id, document);
        }
        Ok(count)
    }

    fn replace_one(
        &self,
        filter: &Filter,
        document: Document,
        insert_if_absent: bool,
    ) -> DocbaseResult<u64> {
        self.check_connected()?;
        let mut data = self.data.write();

        let mut matched_key = None;
        for (key, existing) in data.iter() {
            if filter.apply(existing)? {
                matched_key = Some(key.clone());
                break;
            }
        }

        match matched_key {
            Some(key) => {
                // insert on an existing key keeps the position
                data.insert(key, document);
                Ok(1)
            }
            None if insert_if_absent => {
                let id = document.id()?;
                data.insert(id, document);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_many(&self, filter: &Filter) -> DocbaseResult<u64> {
        self.check_connected()?;
        let mut data = self.data.write();

        let mut keys = Vec::new();
        for (key, document) in data.iter() {
            if filter.apply(document)? {
                keys.push(key.clone());
            }
        }
        for key in &keys {
            data.shift_remove(key);
        }
        Ok(keys.len() as u64)
    }

    fn count(&self, filter: &Filter) -> DocbaseResult<u64> {
        self.check_connected()?;
        let data = self.data.read();
        if is_all_filter(filter) {
            return Ok(data.len() as u64);
        }
        let mut count = 0;
        for document in data.values() {
            if filter.apply(document)? {
                count += 1;
            }
        }
        Ok(count)
    }

    fn clear(&self) -> DocbaseResult<()> {
        self.check_connected()?;
        self.data.write().clear();
        Ok(())
    }

    fn create_index(&self, field: &str, order: SortOrder) -> DocbaseResult<()> {
        self.check_connected()?;
        let mut indexes = self.indexes.write();
        if indexes.contains_key(field) {
            log::error!("Index on {} already exists in {}", field, self.name);
            return Err(DocbaseError::new(
                &format!("Index on {} already exists in {}", field, self.name),
                ErrorKind::IndexingError,
            ));
        }
        indexes.insert(
            field.to_string(),
            IndexDescriptor::new(&self.name, field, order),
        );
        Ok(())
    }

    fn drop_index(&self, field: &str) -> DocbaseResult<()> {
        self.check_connected()?;
        let mut indexes = self.indexes.write();
        if indexes.shift_remove(field).is_none() {
            log::error!("No index on {} in {}", field, self.name);
            return Err(DocbaseError::new(
                &format!("No index on {} in {}", field, self.name),
                ErrorKind::IndexingError,
            ));
        }
        Ok(())
    }

    fn drop_all_indexes(&self) -> DocbaseResult<()> {
        self.check_connected()?;
        self.indexes.write().clear();
        Ok(())
    }

    fn list_indexes(&self) -> DocbaseResult<Vec<IndexDescriptor>> {
        self.check_connected()?;
        Ok(self.indexes.read().values().cloned().collect())
    }

    fn has_index(&self, field: &str) -> DocbaseResult<bool> {
        self.check_connected()?;
        Ok(self.indexes.read().contains_key(field))
    }
}
