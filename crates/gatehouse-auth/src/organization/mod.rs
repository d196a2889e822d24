//! Organization lookup.

pub mod store;

pub use store::{CacheOrganizationStore, OrganizationStore};
