use hyper::{Body, Request, Response, StatusCode};
use serde_json::json;

use crate::api::error::Result;
use crate::api::ext::RequestExt;
use crate::api::macros::make_response;

pub async fn health(req: Request<Body>) -> Result<Response<Body>> {
    let global = req.get_global()?;

    // A health check that cannot reach the database is a failing one.
    let healthy = !global.db.is_closed();

    Ok(make_response!(
        if healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        },
        json!({ "status": if healthy { "ok" } else { "degraded" } })
    ))
}
