//! # gatehouse-api
//!
//! RPC API layer for Gatehouse built on Axum.
//!
//! Resolves the caller's session on every request, builds the procedure
//! context, and runs each call through the gate chain of the procedure its
//! route declares before the handler sees it.

pub mod app;
pub mod context;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod procedure;
pub mod router;
pub mod rpc;
pub mod state;

pub use app::{AppDependencies, build_app};
pub use state::AppState;
