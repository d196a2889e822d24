//! # gatehouse-entity
//!
//! Domain models shared across Gatehouse crates: the resolved caller
//! identity with its session record, and organizations with their members.

pub mod identity;
pub mod organization;
