//! Docbase is a generic repository layer over pluggable document stores.
//!
//! A [Repository] gives one entity type a typed CRUD surface: lookups,
//! filtered streams, batch writes, deletion, counting, pagination, and index
//! management. All persistence delegates to a [store::StoreClient] driver;
//! the facade itself only renames `id` to `_id`, stamps audit timestamps
//! through an injected [common::Clock], validates id formats, and routes
//! id-less updates to insert.
//!
//! A reference in-memory driver ships in [store::memory]; real backends plug
//! in by implementing the two store provider traits.
//!
//! # Example
//!
//! ```rust,ignore
//! use docbase::prelude::*;
//!
//! #[derive(Clone, Entity, Mappable)]
//! #[entity(collection = "books")]
//! struct Book {
//!     id: String,
//!     created_at: DateTime<Utc>,
//!     updated_at: DateTime<Utc>,
//!     title: String,
//!     year: i64,
//! }
//!
//! let repo: Repository<Book> = Repository::builder().build()?;
//! let mut book = Book { title: "Dune".into(), year: 1965, ..Default::default() };
//! repo.insert(&mut book)?;
//!
//! let found = repo.find(field("year").gte(1960i64))?.first()?;
//! ```

// re-exported for the derive macros, which emit docbase::chrono:: paths
pub use chrono;

pub mod common;
pub mod config;
pub mod entity;
pub mod errors;
pub mod filter;
pub mod index;
pub mod repository;
pub mod store;

pub use common::{CancellationToken, Clock, DocId, Document, SortOrder, Value};
pub use config::{ConnectionConfig, StoreUrl};
pub use entity::{Entity, Mappable};
pub use errors::{DocbaseError, DocbaseResult, ErrorKind};
pub use filter::Filter;
pub use index::IndexDescriptor;
pub use repository::{Repository, RepositoryBuilder};

use common::DocIdGenerator;
use std::sync::LazyLock;

/// Document field holding the entity id.
pub const ID_FIELD: &str = "_id";

/// Document field holding the creation timestamp.
pub const CREATED_AT_FIELD: &str = "created_at";

/// Document field holding the last-update timestamp.
pub const UPDATED_AT_FIELD: &str = "updated_at";

// One generator per process keeps DocId counters monotonic.
pub(crate) static ID_GENERATOR: LazyLock<DocIdGenerator> = LazyLock::new(DocIdGenerator::new);

/// Commonly used types, glob-importable in application code.
pub mod prelude {
    pub use crate::common::{
        CancellationToken, Clock, ClockProvider, DocId, Document, FixedClock, SortOrder,
        SystemClock, Value, ValueCodec,
    };
    pub use crate::config::{ConnectionConfig, ConnectionSource, StoreUrl};
    pub use crate::doc;
    pub use crate::entity::{Entity, KeyFormat, Mappable, NativeKey, StringKey};
    pub use crate::errors::{DocbaseError, DocbaseResult, ErrorKind};
    pub use crate::filter::{all, and, by_id, field, not, or, Filter};
    pub use crate::index::IndexDescriptor;
    pub use crate::repository::{EntityCursor, Repository, RepositoryBuilder};
    pub use crate::store::{FindOptions, MemoryStoreClient, StoreClient, StoreCollection};
}
