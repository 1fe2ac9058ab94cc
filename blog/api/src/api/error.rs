use hyper::StatusCode;
use serde_json::json;

use super::auth::AuthError;
use super::macros::make_response;

pub type Result<T, E = RouteError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("an internal server error occurred: {0}")]
    InternalServerError(&'static str),
    #[error("failed to authenticate request: {0}")]
    Auth(#[from] AuthError),
    #[error("failed to parse http body: {0}")]
    ParseHttpBody(#[from] hyper::Error),
    #[error("failed to parse gql request: {0}")]
    ParseGql(#[from] async_graphql::ParseRequestError),
    #[error("{1}")]
    Http(StatusCode, &'static str),
}

impl From<(StatusCode, &'static str)> for ApiError {
    fn from((status, message): (StatusCode, &'static str)) -> Self {
        Self::Http(status, message)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(_) => StatusCode::UNAUTHORIZED,
            ApiError::ParseHttpBody(_) => StatusCode::BAD_REQUEST,
            ApiError::ParseGql(_) => StatusCode::BAD_REQUEST,
            ApiError::Http(status, _) => *status,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::InternalServerError(msg) => msg.to_string(),
            ApiError::Auth(err) => err.to_string(),
            ApiError::ParseHttpBody(err) => err.to_string(),
            ApiError::ParseGql(err) => err.to_string(),
            ApiError::Http(_, msg) => msg.to_string(),
        }
    }
}

pub type RouteError = routerify::RouteError;

pub async fn error_handler(err: RouteError) -> hyper::Response<hyper::Body> {
    let api_error = match err.downcast::<ApiError>() {
        Ok(err) => *err,
        Err(err) => {
            tracing::error!("unhandled route error: {:#}", err);
            ApiError::InternalServerError("unknown error")
        }
    };

    if api_error.status() == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("internal server error: {:#}", api_error);
    }

    make_response!(
        api_error.status(),
        json!({
            "message": api_error.message(),
            "success": false,
        })
    )
}
