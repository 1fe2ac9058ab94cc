use async_graphql::{ComplexObject, Context, SimpleObject};

use super::date::DateRFC3339;
use super::ulid::GqlUlid;
use super::user::User;
use crate::api::v1::gql::error::{GqlError, Result, ResultExt};
use crate::api::v1::gql::ext::ContextExt;
use crate::database;
use crate::database::UserError;

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Post {
    pub id: GqlUlid,
    pub title: String,
    pub content: String,
    pub hashtags: Vec<String>,
    pub writer_id: GqlUlid,
    pub created_at: DateRFC3339,
    pub updated_at: DateRFC3339,
}

#[ComplexObject]
impl Post {
    async fn writer(&self, ctx: &Context<'_>) -> Result<User> {
        let global = ctx.get_global();

        let user = global
            .user_by_id_loader
            .load_one(self.writer_id.to_uuid())
            .await
            .map_err(GqlError::Sqlx)?
            .map_err_gql(UserError::NoUser)?;

        Ok(user.into())
    }
}

impl From<database::Post> for Post {
    fn from(value: database::Post) -> Self {
        Self {
            id: value.id.into(),
            title: value.title,
            content: value.content,
            hashtags: value.hashtags,
            writer_id: value.writer_id.into(),
            created_at: value.created_at.into(),
            updated_at: value.updated_at.into(),
        }
    }
}
