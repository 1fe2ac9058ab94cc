use std::sync::Arc;

use hyper::Body;
use routerify::Router;

use super::error::RouteError;
use crate::global::GlobalState;

pub mod gql;
pub mod health;

pub fn routes(_global: &Arc<GlobalState>) -> Router<Body, RouteError> {
    Router::builder()
        .get("/health", health::health)
        .any_method("/gql", gql::handlers::graphql_handler)
        .get("/gql/playground", gql::handlers::playground_handler)
        .build()
        .expect("failed to build router")
}
