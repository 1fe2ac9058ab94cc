use async_graphql::{Context, Object};

use crate::api::auth::AuthError;
use crate::api::v1::gql::error::Result;
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::models::ulid::GqlUlid;
use crate::api::v1::gql::models::user::User;
use crate::database;
use crate::database::UserSelector;

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Get a user by their id.
    async fn by_id(&self, ctx: &Context<'_>, #[graphql(desc = "The id of the user.")] id: GqlUlid) -> Result<User> {
        let global = ctx.get_global();

        let user = database::User::find_by_option(
            &global.db,
            UserSelector {
                user_id: Some(id.to_uuid()),
                ..Default::default()
            },
        )
        .await?;

        Ok(user.into())
    }

    /// Get the user that is currently logged in.
    async fn with_current_context(&self, ctx: &Context<'_>) -> Result<User> {
        let request_context = ctx.get_req_context();

        let auth = request_context
            .auth()
            .await
            .ok_or(AuthError::NotLoggedIn)?;

        Ok(auth.user.into())
    }
}
