use async_graphql::Context;
use uuid::Uuid;

use super::error::{GqlError, Result};
use super::ext::ContextExt;

/// Returns `value` only when the request is authenticated as `user_id`.
/// Guards fields that are private to their owner.
pub async fn auth_guard<T>(
    ctx: &Context<'_>,
    field: &'static str,
    value: T,
    user_id: Uuid,
) -> Result<T> {
    let request_context = ctx.get_req_context();

    if let Some(auth) = request_context.auth().await {
        if auth.user.id == user_id {
            return Ok(value);
        }
    }

    Err(GqlError::Unauthorized { field }.into())
}
