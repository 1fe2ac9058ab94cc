use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use common::context::Context;

use crate::api::v1::gql;
use crate::config::AppConfig;
use crate::dataloader::{PostsByWriterLoader, UserByIdLoader};

pub struct GlobalState {
    pub config: AppConfig,
    pub ctx: Context,
    pub db: Arc<sqlx::PgPool>,
    pub schema: gql::MySchema,
    pub user_by_id_loader: DataLoader<UserByIdLoader>,
    pub posts_by_writer_loader: DataLoader<PostsByWriterLoader>,
}

impl GlobalState {
    pub fn new(config: AppConfig, db: Arc<sqlx::PgPool>, ctx: Context) -> Self {
        Self {
            config,
            ctx,
            schema: gql::schema(),
            user_by_id_loader: DataLoader::new(UserByIdLoader::new(db.clone()), tokio::spawn),
            posts_by_writer_loader: DataLoader::new(
                PostsByWriterLoader::new(db.clone()),
                tokio::spawn,
            ),
            db,
        }
    }
}
