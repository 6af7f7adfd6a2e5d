//! Local persistent store for the collection snapshot.
//!
//! The store is a plain key-value blob store with synchronous read/write:
//! the loader reads the cache record once at startup, and every collection
//! change after initialization is written through here.

mod storage;

pub use storage::{CacheStore, MemoryStore, NoopStore, SqliteStore};

/// Key under which the serialized collection snapshot is stored.
pub const ITEMS_KEY: &str = "posts";
