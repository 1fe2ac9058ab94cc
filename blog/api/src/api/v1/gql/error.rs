use std::panic::Location;
use std::sync::Arc;

use async_graphql::ErrorExtensions;

use crate::api::auth::AuthError;
use crate::database::{PostError, UserError};

pub type Result<T, E = GqlErrorInterface> = std::result::Result<T, E>;

/// Wraps a [`GqlError`] with the span and source location it was raised in so
/// the server logs stay useful while clients only see the stable code.
#[derive(Debug, Clone)]
pub struct GqlErrorInterface {
    error: GqlError,
    span: tracing::Span,
    location: &'static Location<'static>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GqlError {
    /// An internal server error occurred.
    #[error("internal server error: {0}")]
    InternalServerError(&'static str),
    /// A database error occurred.
    #[error("database error: {0}")]
    Sqlx(#[from] Arc<sqlx::Error>),
    /// The input was invalid.
    #[error("invalid input for {fields:?}: {message}")]
    InvalidInput {
        fields: Vec<&'static str>,
        message: &'static str,
    },
    /// The request was not authenticated.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),
    /// The requester does not have access to the field.
    #[error("unauthorized to access field {field}")]
    Unauthorized { field: &'static str },
    /// A user operation failed.
    #[error("{0}")]
    User(#[from] UserError),
    /// A post operation failed.
    #[error("{0}")]
    Post(#[from] PostError),
}

impl GqlError {
    pub fn code(&self) -> &'static str {
        match self {
            GqlError::InternalServerError(_) => "ERR_UNEXPECTED",
            GqlError::Sqlx(_) => "ERR_UNEXPECTED",
            GqlError::InvalidInput { .. } => "INVALID_INPUT",
            GqlError::Auth(e) => e.code(),
            GqlError::Unauthorized { .. } => "UNAUTHORIZED",
            GqlError::User(e) => e.code(),
            GqlError::Post(e) => e.code(),
        }
    }

    /// The message clients are allowed to see. Internal causes are logged,
    /// never serialized.
    pub fn message(&self) -> String {
        match self {
            GqlError::InternalServerError(_) | GqlError::Sqlx(_) => {
                "An internal server error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            GqlError::InvalidInput { fields, .. } => fields.clone(),
            GqlError::Unauthorized { field } => vec![field],
            _ => Vec::new(),
        }
    }

    fn is_internal(&self) -> bool {
        matches!(self, GqlError::InternalServerError(_) | GqlError::Sqlx(_))
            || matches!(
                self,
                GqlError::User(UserError::Unexpected(_)) | GqlError::Post(PostError::Unexpected(_))
            )
    }
}

impl GqlErrorInterface {
    fn with_span(self, span: tracing::Span) -> Self {
        Self { span, ..self }
    }

    fn with_location(self, location: &'static Location<'static>) -> Self {
        Self { location, ..self }
    }
}

impl<T> From<T> for GqlErrorInterface
where
    GqlError: From<T>,
{
    #[track_caller]
    fn from(error: T) -> Self {
        Self {
            error: GqlError::from(error),
            span: tracing::Span::current(),
            location: Location::caller(),
        }
    }
}

impl From<GqlErrorInterface> for async_graphql::Error {
    fn from(error: GqlErrorInterface) -> Self {
        error.extend()
    }
}

impl ErrorExtensions for GqlErrorInterface {
    fn extend(&self) -> async_graphql::Error {
        if self.error.is_internal() {
            self.span.in_scope(|| {
                tracing::error!(
                    location = %self.location,
                    error = %self.error,
                    "gql error",
                );
            });
        } else {
            self.span.in_scope(|| {
                tracing::debug!(
                    location = %self.location,
                    error = %self.error,
                    "gql error",
                );
            });
        }

        let fields = self.error.fields();

        async_graphql::Error::new(self.error.message()).extend_with(|_, e| {
            e.set("code", self.error.code());
            e.set("reason", self.error.to_string());
            if !fields.is_empty() {
                e.set(
                    "fields",
                    fields.iter().map(|f| f.to_string()).collect::<Vec<_>>(),
                );
            }
        })
    }
}

pub trait ResultExt<T, E>: Sized {
    fn map_err_gql<C>(self, ctx: C) -> Result<T>
    where
        GqlErrorInterface: From<C>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E> {
    #[track_caller]
    fn map_err_gql<C>(self, ctx: C) -> Result<T>
    where
        GqlErrorInterface: From<C>,
    {
        let location = Location::caller();

        match self {
            Ok(v) => Ok(v),
            Err(_) => Err(GqlErrorInterface::from(ctx)
                .with_location(location)
                .with_span(tracing::Span::current())),
        }
    }
}

impl<T> ResultExt<T, ()> for std::option::Option<T> {
    #[track_caller]
    fn map_err_gql<C>(self, ctx: C) -> Result<T>
    where
        GqlErrorInterface: From<C>,
    {
        let location = Location::caller();

        match self {
            Some(v) => Ok(v),
            None => Err(GqlErrorInterface::from(ctx)
                .with_location(location)
                .with_span(tracing::Span::current())),
        }
    }
}
