use async_graphql::{extensions, EmptySubscription, Schema};

pub mod error;
pub mod ext;
pub mod guards;
pub mod handlers;
pub mod models;
pub mod mutations;
pub mod queries;
pub mod validators;

pub type MySchema = Schema<queries::Query, mutations::Mutation, EmptySubscription>;

pub fn schema() -> MySchema {
    Schema::build(
        queries::Query::default(),
        mutations::Mutation::default(),
        EmptySubscription,
    )
    .extension(extensions::Analyzer)
    .extension(extensions::Tracing)
    .limit_complexity(200) // We don't want anyone to be able to spam us with overly complex queries
    .finish()
}
