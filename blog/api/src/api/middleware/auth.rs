use std::sync::Arc;

use hyper::Body;
use routerify::ext::RequestExt as _;
use routerify::Middleware;

use crate::api::auth::{AuthData, AuthError};
use crate::api::error::{ApiError, RouteError};
use crate::api::ext::RequestExt;
use crate::api::jwt::AuthJwtPayload;
use crate::api::request_context::RequestContext;
use crate::global::GlobalState;

/// Attaches a fresh [`RequestContext`] to every request and, when a bearer
/// token is present, resolves it into an authenticated user. Requests without
/// a token pass through anonymously; resolvers decide what requires auth.
pub fn auth_middleware(_global: &Arc<GlobalState>) -> Middleware<Body, RouteError> {
    Middleware::pre(|req| async move {
        let context = RequestContext::default();
        req.set_context(context.clone());

        let Some(token) = req.headers().get("Authorization") else {
            return Ok(req);
        };

        let global = req.get_global()?;

        let token = token
            .to_str()
            .map_err(|_| ApiError::Auth(AuthError::HeaderToStr))?;

        let token = token
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Auth(AuthError::NotBearerToken))?;

        let jwt = AuthJwtPayload::verify(&global.config.jwt, token)
            .ok_or(ApiError::Auth(AuthError::InvalidToken))?;

        let data = AuthData::from_user_id(&global, jwt.user_id)
            .await
            .map_err(ApiError::Auth)?;

        context.set_auth(data).await;

        Ok(req)
    })
}
