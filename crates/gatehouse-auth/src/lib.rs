//! # gatehouse-auth
//!
//! External collaborators consulted by the request-authorization pipeline.
//!
//! - **session**: session store lookup and identity resolution from a cookie value
//! - **organization**: organization documents with member lists
//! - **turnstile**: bot-verification API client
//! - **ratelimit**: per-route quota limiters (remote, in-memory, no-op)
//!
//! Each collaborator sits behind a trait so the gates in `gatehouse-api`
//! can be exercised without network access.

pub mod organization;
pub mod ratelimit;
pub mod session;
pub mod turnstile;
