use async_trait::async_trait;
use mockall::automock;

use crate::domain::errors::EconomyError;

/// Author attribution for a chat message. System announcements carry the
/// literal label "Sistema" and no user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageAuthor {
    System,
    User { id: i64, name: String },
}

/// Append-only chat log the engine writes announcements into. Every caller
/// treats it as best-effort: a failed append is logged, never escalated.
#[async_trait]
#[automock]
pub trait NotificationSink {
    async fn append(
        &self,
        stream_id: i64,
        author: MessageAuthor,
        text: String,
    ) -> Result<(), EconomyError>;
}
