//! Bot verification.

pub mod client;

pub use client::{BotVerifier, TurnstileClient, VerificationVerdict};
