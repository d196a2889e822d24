//! # gatehouse-core
//!
//! Core crate for Gatehouse. Contains the configuration schemas, the
//! process-wide runtime configuration provider, backend traits, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Gatehouse crates.

pub mod config;
pub mod error;
pub mod result;
pub mod runtime;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
pub use runtime::{RuntimeConfigProvider, RuntimeSettings, SharedRuntimeConfig};
