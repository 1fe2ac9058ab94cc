use std::sync::Arc;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use uuid::Uuid;

/// SQLSTATE code for a not-null constraint violation.
const NOT_NULL_VIOLATION: &str = "23502";

#[derive(Debug, Clone, thiserror::Error)]
pub enum PostError {
    /// No post matched the id.
    #[error("post not found")]
    NoData,
    /// More than one post matched a unique id. Integrity violation.
    #[error("multiple posts matched a unique id")]
    MultipleData,
    /// A required column was missing on insert.
    #[error("a required field was missing")]
    MissingField,
    /// The authenticated user is not the writer of the post.
    #[error("only the writer can modify this post")]
    NotWriter,
    /// The update statement did not change any row.
    #[error("failed to update the post")]
    UpdateFailed,
    /// The delete statement did not remove any row.
    #[error("failed to delete the post")]
    DeleteFailed,
    /// The requested page or limit is out of range.
    #[error("page number and limit must be at least 1")]
    InvalidPage,
    /// Any other database error.
    #[error("unexpected database error: {0}")]
    Unexpected(Arc<sqlx::Error>),
}

impl PostError {
    pub fn code(&self) -> &'static str {
        match self {
            PostError::NoData => "ERR_NO_DATA",
            PostError::MultipleData => "ERR_MULTIPLE_DATA",
            PostError::MissingField => "ERR_NO_FIELD",
            PostError::NotWriter => "ERR_NOT_WRITER",
            PostError::UpdateFailed => "ERR_UPDATE_FAIL",
            PostError::DeleteFailed => "ERR_DELETE_FAIL",
            PostError::InvalidPage => "ERR_INVALID_PAGE",
            PostError::Unexpected(_) => "ERR_UNEXPECTED",
        }
    }
}

impl From<sqlx::Error> for PostError {
    fn from(err: sqlx::Error) -> Self {
        Self::Unexpected(Arc::new(err))
    }
}

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct Post {
    /// The unique identifier for the post.
    pub id: Uuid,
    /// The title of the post.
    pub title: String,
    /// The body of the post.
    pub content: String,
    /// Hashtags attached to the post. Deduplicated on write, order of first
    /// occurrence is preserved.
    pub hashtags: Vec<String>,
    /// The id of the user who wrote the post.
    pub writer_id: Uuid,
    /// The time the post was created.
    pub created_at: DateTime<Utc>,
    /// The time the post was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a post. `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub hashtags: Option<Vec<String>>,
}

/// Removes duplicate hashtags while keeping the first occurrence order.
pub fn dedup_hashtags(hashtags: Vec<String>) -> Vec<String> {
    hashtags.into_iter().unique().collect()
}

/// Translates a 1-indexed page number and limit into a row offset.
pub fn page_offset(page_number: i32, limit: i32) -> Result<i64, PostError> {
    if page_number < 1 || limit < 1 {
        return Err(PostError::InvalidPage);
    }

    Ok((page_number as i64 - 1) * limit as i64)
}

/// Decides what to do with a delete from its affected-row count. Exactly one
/// row is the only outcome that may commit; more than one means the predicate
/// hit rows it must not have and the transaction has to be abandoned.
fn delete_outcome(rows_affected: u64) -> Result<bool, PostError> {
    match rows_affected {
        0 => Err(PostError::DeleteFailed),
        1 => Ok(true),
        _ => Err(PostError::MultipleData),
    }
}

impl Post {
    pub fn validate_title(title: &str) -> Result<(), &'static str> {
        if title.trim().is_empty() {
            return Err("Title must not be empty");
        }

        if title.len() > 512 {
            return Err("Title must be at most 512 characters long");
        }

        Ok(())
    }

    /// Inserts a new post. A not-null violation maps to
    /// [`PostError::MissingField`].
    pub async fn create(
        db: &sqlx::PgPool,
        writer_id: Uuid,
        title: &str,
        content: &str,
        hashtags: Vec<String>,
    ) -> Result<Post, PostError> {
        sqlx::query_as(
            r#"
            INSERT INTO posts (
                id,
                title,
                content,
                hashtags,
                writer_id
            ) VALUES (
                $1,
                $2,
                $3,
                $4,
                $5
            ) RETURNING *
            "#,
        )
        .bind(Uuid::from(ulid::Ulid::new()))
        .bind(title)
        .bind(content)
        .bind(dedup_hashtags(hashtags))
        .bind(writer_id)
        .fetch_one(db)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(e) if e.code().as_deref() == Some(NOT_NULL_VIOLATION) => {
                PostError::MissingField
            }
            _ => PostError::Unexpected(Arc::new(err)),
        })
    }

    /// Looks up a single post by id. Zero matches fail with
    /// [`PostError::NoData`]; more than one match fails with
    /// [`PostError::MultipleData`] since the primary key makes that an
    /// integrity violation.
    pub async fn find_by_id(db: &sqlx::PgPool, id: Uuid) -> Result<Post, PostError> {
        let mut posts: Vec<Post> = sqlx::query_as(
            r#"
            SELECT
                *
            FROM
                posts
            WHERE
                id = $1
            LIMIT 2
            "#,
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        if posts.len() > 1 {
            return Err(PostError::MultipleData);
        }

        posts.pop().ok_or(PostError::NoData)
    }

    /// Returns one page of posts, newest first. Pages are 1-indexed; a page
    /// past the end is an empty list, not an error.
    pub async fn paginate(
        db: &sqlx::PgPool,
        page_number: i32,
        limit: i32,
    ) -> Result<Vec<Post>, PostError> {
        let offset = page_offset(page_number, limit)?;

        Ok(sqlx::query_as(
            r#"
            SELECT
                *
            FROM
                posts
            ORDER BY
                created_at DESC,
                id DESC
            LIMIT $1
            OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(db)
        .await?)
    }

    /// Fetches the post inside the transaction and asserts ownership. The row
    /// is read under the same transaction as the write that follows so the
    /// ownership check cannot race a concurrent transfer or delete.
    async fn get_editable(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: Uuid,
        writer_id: Uuid,
    ) -> Result<Post, PostError> {
        let mut posts: Vec<Post> = sqlx::query_as(
            r#"
            SELECT
                *
            FROM
                posts
            WHERE
                id = $1
            LIMIT 2
            "#,
        )
        .bind(id)
        .fetch_all(&mut **tx)
        .await?;

        if posts.len() > 1 {
            return Err(PostError::MultipleData);
        }

        let post = posts.pop().ok_or(PostError::NoData)?;

        if post.writer_id != writer_id {
            return Err(PostError::NotWriter);
        }

        Ok(post)
    }

    /// Applies a partial update to a post owned by `writer_id`. The ownership
    /// check and the update run in one transaction.
    pub async fn update(
        db: &sqlx::PgPool,
        id: Uuid,
        writer_id: Uuid,
        update: PostUpdate,
    ) -> Result<Post, PostError> {
        let mut tx = db.begin().await?;

        Self::get_editable(&mut tx, id, writer_id).await?;

        let hashtags = update.hashtags.map(dedup_hashtags);

        let post: Post = sqlx::query_as(
            r#"
            UPDATE
                posts
            SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                hashtags = COALESCE($4, hashtags),
                updated_at = NOW()
            WHERE
                id = $1
                AND writer_id = $5
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.title)
        .bind(update.content)
        .bind(hashtags)
        .bind(writer_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(PostError::UpdateFailed)?;

        tx.commit().await?;

        Ok(post)
    }

    /// Deletes a post owned by `writer_id`. The ownership check and the
    /// delete run in one transaction; anything but exactly one removed row
    /// rolls back.
    pub async fn delete(db: &sqlx::PgPool, id: Uuid, writer_id: Uuid) -> Result<bool, PostError> {
        let mut tx = db.begin().await?;

        Self::get_editable(&mut tx, id, writer_id).await?;

        let result = sqlx::query(
            r#"
            DELETE FROM
                posts
            WHERE
                id = $1
                AND writer_id = $2
            "#,
        )
        .bind(id)
        .bind(writer_id)
        .execute(&mut *tx)
        .await?;

        match delete_outcome(result.rows_affected()) {
            Ok(deleted) => {
                tx.commit().await?;
                Ok(deleted)
            }
            Err(PostError::MultipleData) => {
                tx.rollback().await?;
                Err(PostError::MultipleData)
            }
            Err(err) => Err(err),
        }
    }
}
