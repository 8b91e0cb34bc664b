use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::messages;

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub struct InsertMessageEntity {
    pub stream_id: i64,
    pub user_id: Option<i64>,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
