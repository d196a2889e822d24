//! Account procedures.

use serde::de::IgnoredAny;

use gatehouse_core::result::AppResult;

use crate::context::AccountContext;
use crate::dto::response::AccountResponse;

/// `account.me`: the signed-in caller.
pub async fn me(ctx: AccountContext, _input: IgnoredAny) -> AppResult<AccountResponse> {
    Ok(AccountResponse::from(&ctx.identity))
}
