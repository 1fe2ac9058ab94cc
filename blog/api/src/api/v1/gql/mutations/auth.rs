use async_graphql::{Context, Object, SimpleObject};

use crate::api::auth::AuthData;
use crate::api::jwt::AuthJwtPayload;
use crate::api::v1::gql::error::{GqlError, Result, ResultExt};
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::models::ulid::GqlUlid;
use crate::database;
use crate::database::{UserError, UserSelector};

#[derive(Default)]
pub struct AuthMutation;

#[derive(SimpleObject)]
pub struct LoginResult {
    /// A signed JWT to authenticate future requests with.
    pub token: String,
    /// The id of the user that logged in.
    pub user_id: GqlUlid,
}

#[Object]
impl AuthMutation {
    /// Log in with an email and password.
    async fn login(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "The email of the user.")] email: String,
        #[graphql(desc = "The password of the user.")] password: String,
    ) -> Result<LoginResult> {
        let global = ctx.get_global();
        let request_context = ctx.get_req_context();

        let user = database::User::find_by_option(
            &global.db,
            UserSelector {
                email: Some(email),
                ..Default::default()
            },
        )
        .await?;

        if user.is_deleted() {
            return Err(UserError::DeletedUser.into());
        }

        if !user.verify_password(&password) {
            return Err(GqlError::InvalidInput {
                fields: vec!["password"],
                message: "wrong password",
            }
            .into());
        }

        let token = AuthJwtPayload::from_login(user.id, user.email.clone())
            .serialize(&global.config.jwt)
            .map_err_gql(GqlError::InternalServerError("failed to serialize auth jwt"))?;

        let user_id = user.id;

        // The rest of this request runs authenticated as the new login.
        request_context.set_auth(AuthData { user }).await;

        Ok(LoginResult {
            token,
            user_id: user_id.into(),
        })
    }

    /// Log out, clearing the auth state for the rest of the request.
    async fn logout(&self, ctx: &Context<'_>) -> Result<bool> {
        let request_context = ctx.get_req_context();

        request_context.reset_auth().await;

        Ok(true)
    }
}
