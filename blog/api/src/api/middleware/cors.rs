use std::sync::Arc;

use hyper::header::HeaderValue;
use hyper::Body;
use routerify::Middleware;

use crate::api::error::RouteError;
use crate::global::GlobalState;

pub fn cors_middleware(_global: &Arc<GlobalState>) -> Middleware<Body, RouteError> {
    Middleware::post(|mut resp| async move {
        resp.headers_mut()
            .insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
        resp.headers_mut().insert(
            "Access-Control-Allow-Methods",
            HeaderValue::from_static("GET, POST, OPTIONS"),
        );
        resp.headers_mut().insert(
            "Access-Control-Allow-Headers",
            HeaderValue::from_static("Content-Type, Authorization"),
        );

        Ok(resp)
    })
}
