//! # gatehouse-cache
//!
//! Document store for the session records and organization documents the
//! auth service writes. Two backends:
//!
//! - **memory**: in-process store using [moka](https://crates.io/crates/moka),
//!   for development and tests
//! - **redis**: the store shared with the auth service in production
//!
//! The backend is selected at startup from `cache.provider`.

#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
