//! Caller identity and the session record it is derived from.

pub mod model;

pub use model::{AccountAttributes, Identity, SessionRecord};
