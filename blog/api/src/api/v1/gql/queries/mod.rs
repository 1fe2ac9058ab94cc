use async_graphql::Object;

pub mod post;
pub mod user;

#[derive(Default)]
pub struct Query {
    user: user::UserQuery,
    post: post::PostQuery,
}

#[Object]
/// The root query type which contains root level fields.
impl Query {
    async fn user(&self) -> &user::UserQuery {
        &self.user
    }

    async fn post(&self) -> &post::PostQuery {
        &self.post
    }
}
