//! Request DTOs for the public procedures.
//!
//! Every form that is protected by bot verification carries the optional
//! `turnstileToken`; the verification gate reads it from the raw input
//! before these types are decoded.

use serde::{Deserialize, Serialize};
use validator::Validate;

use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;

/// `contact.submit` input.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    /// Sender name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Reply address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Message body.
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    /// Challenge response token.
    #[serde(default)]
    pub turnstile_token: Option<String>,
}

/// `waitlist.join` input.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistRequest {
    /// Address to notify.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Challenge response token.
    #[serde(default)]
    pub turnstile_token: Option<String>,
}

/// `auth.requestPasswordReset` input.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    /// Account email.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Where the reset link should lead.
    #[serde(default)]
    pub redirect_to: Option<String>,
    /// Challenge response token.
    #[serde(default)]
    pub turnstile_token: Option<String>,
}

/// `auth.signUp` input.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    /// Account email.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Challenge response token.
    #[serde(default)]
    pub turnstile_token: Option<String>,
}

/// Runs the derived field checks, reporting the first failing field.
pub fn validate_input<T: Validate>(input: &T) -> AppResult<()> {
    input.validate().map_err(|errors| {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        let message = fields
            .iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid input".to_string());
        AppError::bad_request(message)
    })
}
