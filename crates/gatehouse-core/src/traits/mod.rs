//! Backend traits implemented by the infrastructure crates.

pub mod cache;

pub use cache::{CacheProvider, DocumentKey, DocumentKind};
