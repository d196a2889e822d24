//! Public form submissions guarded by bot verification and rate limits.
//!
//! Delivery (mail, CRM, account creation) happens downstream; these
//! handlers validate and acknowledge.

use tracing::info;

use gatehouse_core::result::AppResult;

use crate::context::ProcedureContext;
use crate::dto::request::{
    ContactRequest, PasswordResetRequest, SignUpRequest, WaitlistRequest, validate_input,
};
use crate::dto::response::AcceptedResponse;

/// `contact.submit`
pub async fn contact_submit(
    ctx: ProcedureContext,
    input: ContactRequest,
) -> AppResult<AcceptedResponse> {
    validate_input(&input)?;
    info!(ip = ?ctx.event.client_ip(), "Contact request received");
    Ok(AcceptedResponse::new("Thanks, we'll be in touch"))
}

/// `waitlist.join`
pub async fn waitlist_join(
    _ctx: ProcedureContext,
    input: WaitlistRequest,
) -> AppResult<AcceptedResponse> {
    validate_input(&input)?;
    Ok(AcceptedResponse::new("You're on the list"))
}

/// `auth.requestPasswordReset`
///
/// Responds identically whether or not the account exists.
pub async fn request_password_reset(
    _ctx: ProcedureContext,
    input: PasswordResetRequest,
) -> AppResult<AcceptedResponse> {
    validate_input(&input)?;
    Ok(AcceptedResponse::new(
        "If an account exists for that address, a reset link is on its way",
    ))
}

/// `auth.signUp`
pub async fn sign_up(ctx: ProcedureContext, input: SignUpRequest) -> AppResult<AcceptedResponse> {
    validate_input(&input)?;
    info!(ip = ?ctx.event.client_ip(), "Sign-up request received");
    Ok(AcceptedResponse::new("Check your inbox to confirm your email"))
}
