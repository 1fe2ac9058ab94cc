use async_graphql::Object;

pub mod auth;
pub mod post;
pub mod user;

#[derive(Default)]
pub struct Mutation {
    auth: auth::AuthMutation,
    user: user::UserMutation,
    post: post::PostMutation,
}

#[Object]
/// The root mutation type which contains root level fields.
impl Mutation {
    async fn auth(&self) -> &auth::AuthMutation {
        &self.auth
    }

    async fn user(&self) -> &user::UserMutation {
        &self.user
    }

    async fn post(&self) -> &post::PostMutation {
        &self.post
    }
}
