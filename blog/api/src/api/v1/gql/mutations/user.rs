use async_graphql::{Context, Object};

use crate::api::v1::gql::error::{GqlError, Result};
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::models::user::User;
use crate::api::v1::gql::validators::validate_password;
use crate::database;

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Create a new user account.
    async fn create(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "The display name of the new user.")] name: String,
        #[graphql(desc = "The email of the new user, must be unique.")] email: String,
        #[graphql(desc = "The password of the new user.")] password: String,
    ) -> Result<User> {
        let global = ctx.get_global();

        database::User::validate_name(&name).map_err(|message| GqlError::InvalidInput {
            fields: vec!["name"],
            message,
        })?;

        database::User::validate_email(&email).map_err(|message| GqlError::InvalidInput {
            fields: vec!["email"],
            message,
        })?;

        validate_password(&password).map_err(|message| GqlError::InvalidInput {
            fields: vec!["password"],
            message,
        })?;

        let password_hash = database::User::hash_password(&password);

        let user = database::User::create(&global.db, &name, &email, &password_hash).await?;

        Ok(user.into())
    }
}
