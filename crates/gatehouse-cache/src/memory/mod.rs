//! In-memory store.

pub mod store;

pub use store::MemoryCacheProvider;
