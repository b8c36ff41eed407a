use crate::common::Clock;
use crate::config::{ConnectionConfig, ConnectionSource};
use crate::entity::Entity;
use crate::errors::{DocbaseError, DocbaseResult, ErrorKind};
use crate::repository::{DefaultRepository, Repository};
use crate::store::memory::MEMORY_SCHEME;
use crate::store::{MemoryStoreClient, StoreClient};
use std::marker::PhantomData;

/// Fluent builder for a [Repository].
///
/// Steps capture the first error they hit and `build()` reports it, so a
/// whole configuration chain can be written without intermediate `?`.
///
/// Client resolution at build time: an injected [StoreClient] wins; otherwise
/// the default source and `memory` urls resolve to the bundled backend, and
/// any other scheme is `StoreUnavailable`.
///
/// Collection name precedence: builder override, then the configuration's
/// explicit name, then the entity-derived name.
///
/// # Examples
///
/// ```rust,ignore
/// let repo: Repository<Book> = Repository::builder()
///     .with_connection_string("memory://localhost/library")
///     .with_collection_name("books")
///     .build()?;
/// ```
pub struct RepositoryBuilder<T: Entity> {
    client: Option<StoreClient>,
    config: Option<ConnectionConfig>,
    collection_name: Option<String>,
    clock: Option<Clock>,
    error: Option<DocbaseError>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> RepositoryBuilder<T> {
    pub fn new() -> Self {
        RepositoryBuilder {
            client: None,
            config: None,
            collection_name: None,
            clock: None,
            error: None,
            _entity: PhantomData,
        }
    }

    /// Uses an already-connected store client.
    pub fn with_client(mut self, client: StoreClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Uses an explicit connection configuration.
    pub fn with_config(mut self, config: ConnectionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Parses and uses a `scheme://host[:port]/database` connection string.
    pub fn with_connection_string(mut self, connection_string: &str) -> Self {
        match ConnectionConfig::from_connection_string(connection_string) {
            Ok(config) => self.config = Some(config),
            Err(error) => {
                if self.error.is_none() {
                    self.error = Some(error);
                }
            }
        }
        self
    }

    /// Overrides the collection name.
    pub fn with_collection_name(mut self, name: &str) -> Self {
        self.collection_name = Some(name.to_string());
        self
    }

    /// Injects the clock used for audit timestamps.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Resolves the client and collection and builds the repository.
    pub fn build(self) -> DocbaseResult<Repository<T>> {
        if let Some(error) = self.error {
            log::error!("Repository builder failed: {}", error);
            return Err(error);
        }

        let config = self.config.unwrap_or_default();
        let client = match self.client {
            Some(client) => client,
            None => resolve_client(&config)?,
        };

        let collection_name = self
            .collection_name
            .or_else(|| config.collection().map(str::to_string))
            .unwrap_or_else(T::collection_name);

        let collection = client.collection(&collection_name)?;
        let clock = self.clock.unwrap_or_default();
        log::info!("Built repository over collection {}", collection_name);
        Ok(Repository::new(DefaultRepository::new(collection, clock)))
    }
}

impl<T: Entity> Default for RepositoryBuilder<T> {
    fn default() -> Self {
        RepositoryBuilder::new()
    }
}

fn resolve_client(config: &ConnectionConfig) -> DocbaseResult<StoreClient> {
    match config.source() {
        ConnectionSource::Default => MemoryStoreClient::connect(config),
        ConnectionSource::Url(url) if url.scheme() == MEMORY_SCHEME => {
            MemoryStoreClient::connect(config)
        }
        ConnectionSource::Url(url) => {
            log::error!("No store driver for scheme {}", url.scheme());
            Err(DocbaseError::new(
                &format!("No store driver for scheme {}", url.scheme()),
                ErrorKind::StoreUnavailable,
            ))
        }
    }
}
