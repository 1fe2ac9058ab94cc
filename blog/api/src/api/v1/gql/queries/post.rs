use async_graphql::{Context, Object};

use crate::api::v1::gql::error::Result;
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::models::post::Post;
use crate::api::v1::gql::models::ulid::GqlUlid;
use crate::database;

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// Get a post by its id.
    async fn by_id(&self, ctx: &Context<'_>, #[graphql(desc = "The id of the post.")] id: GqlUlid) -> Result<Post> {
        let global = ctx.get_global();

        let post = database::Post::find_by_id(&global.db, id.to_uuid()).await?;

        Ok(post.into())
    }

    /// Get a page of posts, newest first. Pages are 1-indexed.
    async fn list(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "The page number, starting at 1.")] page_number: i32,
        #[graphql(desc = "The number of posts per page.")] limit: i32,
    ) -> Result<Vec<Post>> {
        let global = ctx.get_global();

        let posts = database::Post::paginate(&global.db, page_number, limit).await?;

        Ok(posts.into_iter().map(Into::into).collect())
    }
}
