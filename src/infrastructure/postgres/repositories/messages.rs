use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use crate::{
    domain::{
        entities::messages::InsertMessageEntity,
        errors::EconomyError,
        repositories::notifications::{MessageAuthor, NotificationSink},
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::messages},
};

const SYSTEM_AUTHOR: &str = "Sistema";

pub struct ChatMessagePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ChatMessagePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl NotificationSink for ChatMessagePostgres {
    async fn append(
        &self,
        stream_id: i64,
        author: MessageAuthor,
        text: String,
    ) -> Result<(), EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let (user_id, author_name) = match author {
            MessageAuthor::System => (None, SYSTEM_AUTHOR.to_string()),
            MessageAuthor::User { id, name } => (Some(id), name),
        };

        diesel::insert_into(messages::table)
            .values(&InsertMessageEntity {
                stream_id,
                user_id,
                author: author_name,
                text,
                created_at: Utc::now(),
            })
            .execute(&mut conn)?;

        Ok(())
    }
}
