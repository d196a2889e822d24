//! Per-route rate limiting.
//!
//! Every public rate-limited route owns one limiter bound to its
//! namespace, limit and window. Which implementation backs it is decided
//! once at startup by [`factory::ConfiguredLimiterFactory`].

pub mod factory;
pub mod limiter;
pub mod memory;
pub mod noop;
pub mod remote;

pub use factory::{ConfiguredLimiterFactory, LimiterFactory};
pub use limiter::{RateLimitOutcome, RateLimitRule, RateLimiter};
pub use memory::MemoryRateLimiter;
pub use noop::NoopRateLimiter;
pub use remote::RemoteRateLimiter;
