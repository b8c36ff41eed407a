//! The store boundary: driver contracts, find options, cursors, and the
//! bundled in-memory backend.

mod cursor;
mod find_options;
pub mod memory;
mod store_client;

pub use cursor::DocumentCursor;
pub use find_options::FindOptions;
pub use memory::MemoryStoreClient;
pub use store_client::{StoreClient, StoreClientProvider, StoreCollection, StoreCollectionProvider};
