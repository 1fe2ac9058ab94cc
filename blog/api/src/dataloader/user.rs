use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::Loader;
use uuid::Uuid;

use crate::database::User;

pub struct UserByIdLoader {
    db: Arc<sqlx::PgPool>,
}

impl UserByIdLoader {
    pub fn new(db: Arc<sqlx::PgPool>) -> Self {
        Self { db }
    }
}

impl Loader<Uuid> for UserByIdLoader {
    type Value = User;
    type Error = Arc<sqlx::Error>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let users: Vec<User> = sqlx::query_as(
            r#"
            SELECT
                *
            FROM
                users
            WHERE
                id = ANY($1)
            "#,
        )
        .bind(keys.to_vec())
        .fetch_all(self.db.as_ref())
        .await
        .map_err(Arc::new)?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}
