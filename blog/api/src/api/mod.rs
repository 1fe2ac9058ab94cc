use std::sync::Arc;

use anyhow::{anyhow, Result};
use hyper::server::Server;
use hyper::Body;
use routerify::{Router, RouterService};

use crate::global::GlobalState;

pub mod auth;
pub mod error;
pub mod ext;
pub mod jwt;
pub mod macros;
pub mod middleware;
pub mod request_context;
pub mod v1;

use self::error::RouteError;

fn routes(global: &Arc<GlobalState>) -> Router<Body, RouteError> {
    let weak = Arc::downgrade(global);

    Router::builder()
        // The weak global state is upgraded per-request, dropping the last
        // strong reference during shutdown is what lets the server stop.
        .data(weak)
        .middleware(middleware::cors::cors_middleware(global))
        .middleware(middleware::auth::auth_middleware(global))
        .scope("/v1", v1::routes(global))
        .err_handler(error::error_handler)
        .build()
        .expect("failed to build router")
}

pub async fn run(global: Arc<GlobalState>) -> Result<()> {
    let addr = global.config.api.bind_address;
    tracing::info!("listening on http://{}", addr);

    let router = routes(&global);

    let service =
        RouterService::new(router).map_err(|e| anyhow!("failed to build router service: {}", e))?;

    Server::try_bind(&addr)?
        .serve(service)
        .with_graceful_shutdown(async {
            global.ctx.done().await;
        })
        .await?;

    Ok(())
}
