use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::Loader;
use uuid::Uuid;

use crate::database::Post;

/// Batches the `postList` field on users into a single query.
pub struct PostsByWriterLoader {
    db: Arc<sqlx::PgPool>,
}

impl PostsByWriterLoader {
    pub fn new(db: Arc<sqlx::PgPool>) -> Self {
        Self { db }
    }
}

impl Loader<Uuid> for PostsByWriterLoader {
    type Value = Vec<Post>;
    type Error = Arc<sqlx::Error>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let posts: Vec<Post> = sqlx::query_as(
            r#"
            SELECT
                *
            FROM
                posts
            WHERE
                writer_id = ANY($1)
            ORDER BY
                created_at DESC,
                id DESC
            "#,
        )
        .bind(keys.to_vec())
        .fetch_all(self.db.as_ref())
        .await
        .map_err(Arc::new)?;

        let mut map = HashMap::<Uuid, Vec<Post>>::new();

        for post in posts {
            map.entry(post.writer_id).or_default().push(post);
        }

        Ok(map)
    }
}
