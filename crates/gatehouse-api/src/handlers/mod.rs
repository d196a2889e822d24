//! Procedure and route handlers organized by domain.

pub mod account;
pub mod enterprise;
pub mod health;
pub mod organization;
pub mod public;
