//! Gates and the procedure bundles composed from them.
//!
//! A procedure is a chain of [`Gate`]s run before a handler. Each gate
//! either forwards a context (possibly narrowed to a richer type) or aborts
//! the call with an [`AppError`](gatehouse_core::error::AppError); nothing
//! after a failed gate runs.

pub mod auth;
pub mod builder;
pub mod enterprise;
pub mod gate;
pub mod organization;
pub mod rate_limit;
pub mod table;
pub mod turnstile;

pub use auth::AuthenticationGate;
pub use builder::{Procedure, ProcedureDeps, Procedures};
pub use enterprise::FeatureFlagGate;
pub use gate::{Call, Chain, Gate, Passthrough};
pub use organization::MembershipGate;
pub use rate_limit::RateLimitGate;
pub use turnstile::{BotVerificationGate, VERIFICATION_TOKEN_FIELD};
