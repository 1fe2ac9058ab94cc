use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// SQLSTATE code for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserError {
    /// No selector was provided to look up a user.
    #[error("no option provided to look up a user")]
    NoOption,
    /// No user matched the selector.
    #[error("user not found")]
    NoUser,
    /// More than one user matched a selector that must be unique. This is an
    /// integrity violation, not a normal lookup miss.
    #[error("multiple users matched a unique selector")]
    MultipleUser,
    /// The email is already taken by another user.
    #[error("email is already in use")]
    DuplicateEmail,
    /// The account has been soft-deleted.
    #[error("account has been deleted")]
    DeletedUser,
    /// Any other database error.
    #[error("unexpected database error: {0}")]
    Unexpected(Arc<sqlx::Error>),
}

impl UserError {
    pub fn code(&self) -> &'static str {
        match self {
            UserError::NoOption => "NO_OPTION",
            UserError::NoUser => "NO_USER",
            UserError::MultipleUser => "MULTIPLE_USER",
            UserError::DuplicateEmail => "ERR_DUPLICATION_EMAIL",
            UserError::DeletedUser => "ERR_DELETED_USER",
            UserError::Unexpected(_) => "ERR_UNEXPECTED",
        }
    }
}

impl From<sqlx::Error> for UserError {
    fn from(err: sqlx::Error) -> Self {
        Self::Unexpected(Arc::new(err))
    }
}

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct User {
    /// The unique identifier for the user.
    pub id: Uuid,
    /// The name of the user.
    pub name: String,
    /// The email of the user. Globally unique, stored case-sensitively.
    pub email: String,
    /// The hashed password of the user. (argon2)
    pub password_hash: String,
    /// The time the user was created.
    pub created_at: DateTime<Utc>,
    /// The time the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Set when the user deletes their account. Rows are never hard-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A lookup selector for [`User::find_by_option`]. At least one field must be
/// set; when both are set they must both match.
#[derive(Debug, Clone, Default)]
pub struct UserSelector {
    pub user_id: Option<Uuid>,
    pub email: Option<String>,
}

impl User {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Uses argon2 to verify the password hash against the provided password.
    pub fn verify_password(&self, password: &str) -> bool {
        let hash = match PasswordHash::new(&self.password_hash) {
            Ok(hash) => hash,
            Err(err) => {
                tracing::error!("failed to parse password hash: {}", err);
                return false;
            }
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok()
    }

    /// Generates a new password hash using argon2.
    pub fn hash_password(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("failed to hash password");

        hash.to_string()
    }

    /// Validates a name.
    pub fn validate_name(name: &str) -> Result<(), &'static str> {
        if name.trim().is_empty() {
            return Err("Name must not be empty");
        }

        if name.len() > 256 {
            return Err("Name must be at most 256 characters long");
        }

        Ok(())
    }

    /// Validates an email.
    pub fn validate_email(email: &str) -> Result<(), &'static str> {
        if email.len() < 5 {
            return Err("Email must be at least 5 characters long");
        }

        if email.len() > 256 {
            return Err("Email must be at most 256 characters long");
        }

        if !email.contains('@') {
            return Err("Email must contain an @");
        }

        if !email.contains('.') {
            return Err("Email must contain a .");
        }

        if !email_address::EmailAddress::is_valid(email) {
            return Err("Email is not a valid email address");
        }

        Ok(())
    }

    /// Inserts a new user. The `users.email` column carries a unique
    /// constraint; a violation maps to [`UserError::DuplicateEmail`], any
    /// other failure wraps the cause as [`UserError::Unexpected`].
    pub async fn create(
        db: &sqlx::PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, UserError> {
        sqlx::query_as(
            r#"
            INSERT INTO users (
                id,
                name,
                email,
                password_hash
            ) VALUES (
                $1,
                $2,
                $3,
                $4
            ) RETURNING *
            "#,
        )
        .bind(Uuid::from(ulid::Ulid::new()))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(e) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                UserError::DuplicateEmail
            }
            _ => UserError::Unexpected(Arc::new(err)),
        })
    }

    /// Looks up a single user by id and/or email. Zero matches fail with
    /// [`UserError::NoUser`]; more than one match fails with
    /// [`UserError::MultipleUser`]. Both selectors are unique by construction
    /// so the latter branch guards a broken invariant.
    pub async fn find_by_option(db: &sqlx::PgPool, selector: UserSelector) -> Result<User, UserError> {
        if selector.user_id.is_none() && selector.email.is_none() {
            return Err(UserError::NoOption);
        }

        let mut users: Vec<User> = sqlx::query_as(
            r#"
            SELECT
                *
            FROM
                users
            WHERE
                ($1::uuid IS NULL OR id = $1)
                AND ($2::varchar IS NULL OR email = $2)
            LIMIT 2
            "#,
        )
        .bind(selector.user_id)
        .bind(selector.email)
        .fetch_all(db)
        .await?;

        if users.len() > 1 {
            return Err(UserError::MultipleUser);
        }

        users.pop().ok_or(UserError::NoUser)
    }
}
