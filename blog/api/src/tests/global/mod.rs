use std::str::FromStr;
use std::sync::Arc;

use common::context::{Context, Handler};
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;

use crate::config::AppConfig;
use crate::global::GlobalState;

/// Connects to the dev database, runs migrations and truncates all tables.
/// Tests using this must be `#[serial]` since they share the database.
pub async fn mock_global_state(config: AppConfig) -> (Arc<GlobalState>, Handler) {
    dotenvy::dotenv().ok();

    let db_uri = std::env::var("DATABASE_URL").unwrap_or_else(|_| config.database.uri.clone());

    let db = Arc::new(
        sqlx::PgPool::connect_with(
            PgConnectOptions::from_str(&db_uri)
                .expect("failed to parse database uri")
                .disable_statement_logging()
                .to_owned(),
        )
        .await
        .expect("failed to connect to database"),
    );

    sqlx::migrate!("./migrations")
        .run(db.as_ref())
        .await
        .expect("failed to run migrations");

    sqlx::query("TRUNCATE users, posts CASCADE")
        .execute(db.as_ref())
        .await
        .expect("failed to truncate tables");

    let (ctx, handler) = Context::new();

    (Arc::new(GlobalState::new(config, db, ctx)), handler)
}
