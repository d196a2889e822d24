//! Redis document store.
//!
//! Documents live under `<prefix><namespace>:<id>` with a TTL on every key,
//! so the auth service and Gatehouse agree on the layout while sharing one
//! database with other tenants.

pub mod connection;
pub mod store;

pub use connection::connect;
pub use store::{KeySpace, RedisCacheProvider};
