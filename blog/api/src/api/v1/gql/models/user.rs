use async_graphql::{ComplexObject, Context, SimpleObject};

use super::date::DateRFC3339;
use super::post::Post;
use super::ulid::GqlUlid;
use crate::api::v1::gql::error::{GqlError, Result};
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::guards::auth_guard;
use crate::database;

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct User {
    pub id: GqlUlid,
    pub name: String,
    pub created_at: DateRFC3339,
    pub updated_at: DateRFC3339,

    // Only visible to the user themselves.
    #[graphql(skip)]
    pub email_: String,
}

#[ComplexObject]
impl User {
    async fn email(&self, ctx: &Context<'_>) -> Result<&str> {
        auth_guard(ctx, "email", self.email_.as_str(), self.id.to_uuid()).await
    }

    async fn post_list(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let global = ctx.get_global();

        let posts = global
            .posts_by_writer_loader
            .load_one(self.id.to_uuid())
            .await
            .map_err(GqlError::Sqlx)?
            .unwrap_or_default();

        Ok(posts.into_iter().map(Into::into).collect())
    }
}

impl From<database::User> for User {
    fn from(value: database::User) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
            created_at: value.created_at.into(),
            updated_at: value.updated_at.into(),
            email_: value.email,
        }
    }
}
