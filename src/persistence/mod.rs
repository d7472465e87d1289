//! Client-local persistence
//!
//! Features:
//! - Injectable key-value store (`localStorage` in the browser)
//! - Persisted social-proof counter with an injectable RNG
//! - Every storage failure degrades to a safe fallback

pub mod counter;
pub mod store;

pub use counter::PersistentCounterStore;
pub use store::{KeyValueStore, MemoryStore, NullStore};
