mod auth;
mod post;
mod user;

use std::sync::Arc;

use serde_json::Value;

use crate::api::request_context::RequestContext;
use crate::global::GlobalState;

/// Executes a gql request against the schema the way the http handler would.
pub async fn run_query(
    global: &Arc<GlobalState>,
    request_context: &RequestContext,
    query: &str,
) -> Value {
    let response = global
        .schema
        .execute(
            async_graphql::Request::new(query)
                .data(global.clone())
                .data(request_context.clone()),
        )
        .await;

    serde_json::to_value(&response).expect("failed to serialize response")
}

pub fn error_code(response: &Value) -> Option<&str> {
    response["errors"][0]["extensions"]["code"].as_str()
}
