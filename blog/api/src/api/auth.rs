use std::sync::Arc;

use crate::database::User;
use crate::global::GlobalState;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid authorization header")]
    HeaderToStr,
    #[error("authorization header is not a bearer token")]
    NotBearerToken,
    #[error("not logged in")]
    NotLoggedIn,
    #[error("invalid token")]
    InvalidToken,
    #[error("account has been deleted")]
    DeletedUser,
    #[error("failed to fetch user")]
    FetchUser,
    #[error("user not found")]
    UserNotFound,
}

impl AuthError {
    /// Clients distinguish "log in first" and "your token is bad" from a
    /// server fault by these codes, only the internal fetch failure hides
    /// behind the generic one.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::HeaderToStr => "ERR_BAD_AUTH_HEADER",
            AuthError::NotBearerToken => "ERR_BAD_AUTH_HEADER",
            AuthError::NotLoggedIn => "ERR_NOT_LOGGED_IN",
            AuthError::InvalidToken => "ERR_INVALID_TOKEN",
            AuthError::DeletedUser => "ERR_DELETED_USER",
            AuthError::FetchUser => "ERR_UNEXPECTED",
            AuthError::UserNotFound => "NO_USER",
        }
    }
}

#[derive(Clone)]
pub struct AuthData {
    pub user: User,
}

impl AuthData {
    /// Resolves the token subject into a live user. Soft-deleted accounts do
    /// not authenticate.
    pub async fn from_user_id(
        global: &Arc<GlobalState>,
        user_id: uuid::Uuid,
    ) -> Result<Self, AuthError> {
        let user = global
            .user_by_id_loader
            .load_one(user_id)
            .await
            .map_err(|e| {
                tracing::error!("failed to fetch user: {}", e);
                AuthError::FetchUser
            })?
            .ok_or(AuthError::UserNotFound)?;

        if user.is_deleted() {
            return Err(AuthError::DeletedUser);
        }

        Ok(Self { user })
    }
}
