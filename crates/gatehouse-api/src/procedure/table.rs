//! Static table of public rate-limited routes.

use std::time::Duration;

use gatehouse_auth::ratelimit::RateLimitRule;

/// `(route name, calls allowed, window in seconds)`.
pub const PUBLIC_RATE_LIMITS: &[(&str, u32, u64)] = &[
    ("contact.submit", 5, 60),
    ("waitlist.join", 3, 60),
    ("auth.requestPasswordReset", 3, 300),
    ("auth.signUp", 10, 3600),
];

/// Expands [`PUBLIC_RATE_LIMITS`] into limiter rules.
pub fn rules() -> Vec<RateLimitRule> {
    PUBLIC_RATE_LIMITS
        .iter()
        .map(|&(name, limit, secs)| RateLimitRule::new(name, limit, Duration::from_secs(secs)))
        .collect()
}
