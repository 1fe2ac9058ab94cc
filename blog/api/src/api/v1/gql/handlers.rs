use hyper::{Body, Method, Request, Response, StatusCode};
use routerify::ext::RequestExt as _;

use crate::api::error::{ApiError, Result};
use crate::api::ext::RequestExt;
use crate::api::macros::make_response;
use crate::api::request_context::RequestContext;

pub async fn graphql_handler(req: Request<Body>) -> Result<Response<Body>> {
    if req.method() == Method::OPTIONS {
        return Ok(Response::builder()
            .status(StatusCode::OK)
            .body(Body::empty())
            .expect("failed to build response"));
    }

    let global = req.get_global()?;

    let request_context = req
        .context::<RequestContext>()
        .ok_or(ApiError::InternalServerError("missing request context"))?;

    let gql_request = match *req.method() {
        Method::GET => async_graphql::http::parse_query_string(req.uri().query().unwrap_or(""))
            .map_err(ApiError::ParseGql)?,
        Method::POST => {
            let body = hyper::body::to_bytes(req.into_body())
                .await
                .map_err(ApiError::ParseHttpBody)?;

            serde_json::from_slice::<async_graphql::Request>(&body).map_err(|_| {
                ApiError::Http(StatusCode::BAD_REQUEST, "failed to parse graphql request")
            })?
        }
        _ => {
            return Err(Box::new(ApiError::Http(
                StatusCode::METHOD_NOT_ALLOWED,
                "method not allowed",
            )))
        }
    };

    let response = global
        .schema
        .execute(
            gql_request
                .data(global.clone())
                .data(request_context.clone()),
        )
        .await;

    let body = serde_json::to_string(&response)
        .map_err(|_| ApiError::InternalServerError("failed to serialize response"))?;

    Ok(make_response!(StatusCode::OK, body))
}

pub async fn playground_handler(_req: Request<Body>) -> Result<Response<Body>> {
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html")
        .body(Body::from(async_graphql::http::playground_source(
            async_graphql::http::GraphQLPlaygroundConfig::new("/v1/gql"),
        )))
        .expect("failed to build response"))
}
