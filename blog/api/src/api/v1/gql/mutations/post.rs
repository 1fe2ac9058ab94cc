use async_graphql::{Context, InputObject, Object};

use crate::api::auth::AuthError;
use crate::api::v1::gql::error::{GqlError, Result};
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::models::post::Post;
use crate::api::v1::gql::models::ulid::GqlUlid;
use crate::database;
use crate::database::PostUpdate;

#[derive(Default)]
pub struct PostMutation;

#[derive(InputObject)]
pub struct CreatePostInput {
    /// The title of the post.
    pub title: String,
    /// The body of the post.
    pub content: String,
    /// Hashtags to attach to the post, duplicates are dropped.
    pub hashtags: Option<Vec<String>>,
}

#[derive(InputObject)]
pub struct UpdatePostInput {
    /// The id of the post to update.
    pub id: GqlUlid,
    /// A new title, unchanged when absent.
    pub title: Option<String>,
    /// A new body, unchanged when absent.
    pub content: Option<String>,
    /// A new full hashtag list, unchanged when absent.
    pub hashtags: Option<Vec<String>>,
}

#[derive(InputObject)]
pub struct DeletePostInput {
    /// The id of the post to delete.
    pub id: GqlUlid,
}

#[Object]
impl PostMutation {
    /// Create a new post, written by the logged in user.
    async fn create(&self, ctx: &Context<'_>, input: CreatePostInput) -> Result<Post> {
        let global = ctx.get_global();
        let request_context = ctx.get_req_context();

        let auth = request_context
            .auth()
            .await
            .ok_or(AuthError::NotLoggedIn)?;

        database::Post::validate_title(&input.title).map_err(|message| GqlError::InvalidInput {
            fields: vec!["title"],
            message,
        })?;

        let post = database::Post::create(
            &global.db,
            auth.user.id,
            &input.title,
            &input.content,
            input.hashtags.unwrap_or_default(),
        )
        .await?;

        Ok(post.into())
    }

    /// Update a post. Only the writer can update their posts.
    async fn update(&self, ctx: &Context<'_>, input: UpdatePostInput) -> Result<Post> {
        let global = ctx.get_global();
        let request_context = ctx.get_req_context();

        let auth = request_context
            .auth()
            .await
            .ok_or(AuthError::NotLoggedIn)?;

        if let Some(title) = &input.title {
            database::Post::validate_title(title).map_err(|message| GqlError::InvalidInput {
                fields: vec!["title"],
                message,
            })?;
        }

        let post = database::Post::update(
            &global.db,
            input.id.to_uuid(),
            auth.user.id,
            PostUpdate {
                title: input.title,
                content: input.content,
                hashtags: input.hashtags,
            },
        )
        .await?;

        Ok(post.into())
    }

    /// Delete a post. Only the writer can delete their posts.
    async fn delete(&self, ctx: &Context<'_>, input: DeletePostInput) -> Result<bool> {
        let global = ctx.get_global();
        let request_context = ctx.get_req_context();

        let auth = request_context
            .auth()
            .await
            .ok_or(AuthError::NotLoggedIn)?;

        Ok(database::Post::delete(&global.db, input.id.to_uuid(), auth.user.id).await?)
    }
}
