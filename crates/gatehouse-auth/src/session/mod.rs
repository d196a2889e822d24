//! Session store and identity resolution.

pub mod resolver;
pub mod store;

pub use resolver::SessionResolver;
pub use store::{CacheSessionStore, SessionStore};
