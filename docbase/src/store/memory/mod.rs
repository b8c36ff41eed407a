//! The bundled in-memory store backend.

mod client;
mod collection;

pub use client::{MemoryStoreClient, MEMORY_SCHEME};
