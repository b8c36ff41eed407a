use crate::config::{ConnectionConfig, ConnectionSource};
use crate::errors::{DocbaseError, DocbaseResult, ErrorKind};
use crate::store::memory::collection::MemoryCollection;
use crate::store::{StoreClient, StoreClientProvider, StoreCollection, StoreCollectionProvider};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The url scheme the memory backend answers to.
pub const MEMORY_SCHEME: &str = "memory";

const DEFAULT_DATABASE: &str = "default";

/// The bundled in-memory store backend.
///
/// Collections live in a [DashMap] for the lifetime of the client; nothing is
/// persisted. Accepts the default connection source and `memory://` urls
/// only. Host and port in a `memory://` url are accepted and ignored.
pub struct MemoryStoreClient {
    database: String,
    collections: DashMap<String, Arc<MemoryCollection>>,
    connected: Arc<AtomicBool>,
}

impl MemoryStoreClient {
    /// Connects per the configuration and returns a generic client handle.
    ///
    /// # Errors
    ///
    /// Returns `StoreUnavailable` for any url scheme other than `memory`.
    pub fn connect(config: &ConnectionConfig) -> DocbaseResult<StoreClient> {
        let database = match config.source() {
            ConnectionSource::Default => DEFAULT_DATABASE.to_string(),
            ConnectionSource::Url(url) if url.scheme() == MEMORY_SCHEME => {
                url.database().to_string()
            }
            ConnectionSource::Url(url) => {
                log::error!("Memory backend cannot serve scheme {}", url.scheme());
                return Err(DocbaseError::new(
                    &format!("Memory backend cannot serve scheme {}", url.scheme()),
                    ErrorKind::StoreUnavailable,
                ));
            }
        };

        log::info!("Connected memory store, database {}", database);
        Ok(StoreClient::new(MemoryStoreClient {
            database,
            collections: DashMap::new(),
            connected: Arc::new(AtomicBool::new(true)),
        }))
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl StoreClientProvider for MemoryStoreClient {
    fn collection(&self, name: &str) -> DocbaseResult<StoreCollection> {
        if !self.connected.load(Ordering::SeqCst) {
            log::error!("Collection {} requested on closed client", name);
            return Err(DocbaseError::new(
                "Store connection is closed",
                ErrorKind::StoreUnavailable,
            ));
        }

        let collection = self
            .collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryCollection::new(name, self.connected.clone())))
            .clone();
        Ok(StoreCollection::from_arc(
            collection as Arc<dyn StoreCollectionProvider>,
        ))
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn close(&self) -> DocbaseResult<()> {
        log::info!("Closing memory store, database {}", self.database);
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::filter::all;

    #[test]
    fn connects_with_default_config() {
        let client = MemoryStoreClient::connect(&ConnectionConfig::default()).unwrap();
        assert!(client.is_connected());
    }

    #[test]
    fn connects_with_memory_url() {
        let config = ConnectionConfig::from_connection_string("memory://localhost/app_db").unwrap();
        let client = MemoryStoreClient::connect(&config).unwrap();
        assert!(client.is_connected());
    }

    #[test]
    fn rejects_foreign_schemes() {
        let config = ConnectionConfig::from_connection_string("mongodb://localhost/db").unwrap();
        let error = MemoryStoreClient::connect(&config).unwrap_err();
        assert_eq!(error.kind(), &ErrorKind::StoreUnavailable);
    }

    #[test]
    fn collection_handles_share_data() {
        let client = MemoryStoreClient::connect(&ConnectionConfig::default()).unwrap();
        let first = client.collection("books").unwrap();
        let second = client.collection("books").unwrap();

        first
            .insert_many(vec![doc! { "_id": "a", "title": "Dune" }])
            .unwrap();
        assert_eq!(second.count(&all()).unwrap(), 1);
    }

    #[test]
    fn handles_format_for_debugging() {
        let client = MemoryStoreClient::connect(&ConnectionConfig::default()).unwrap();
        assert!(format!("{:?}", client).contains("StoreClient"));

        let collection = client.collection("books").unwrap();
        let formatted = format!("{:?}", collection);
        assert!(formatted.contains("StoreCollection"));
        assert!(formatted.contains("books"));
    }

    #[test]
    fn close_stops_further_operations() {
        let client = MemoryStoreClient::connect(&ConnectionConfig::default()).unwrap();
        let collection = client.collection("books").unwrap();

        client.close().unwrap();
        assert!(!client.is_connected());
        assert_eq!(
            client.collection("books").unwrap_err().kind(),
            &ErrorKind::StoreUnavailable
        );
        assert_eq!(
            collection.count(&all()).unwrap_err().kind(),
            &ErrorKind::StoreUnavailable
        );
    }
}
