use async_trait::async_trait;

use crate::error::Result;
use crate::models::posting::PostingWithAuthor;
use crate::services::telegram_service::{ChatTransport, TelegramClient};
use crate::utils::render;

/// Public broadcast surface for approved postings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Posts the rendered posting and returns the channel message id.
    async fn publish(&self, posting: &PostingWithAuthor) -> Result<i64>;

    async fn delete(&self, channel_message_id: i64) -> Result<()>;
}

#[derive(Clone)]
pub struct ChannelPublisher {
    telegram: TelegramClient,
    channel_id: i64,
}

impl ChannelPublisher {
    pub fn new(telegram: TelegramClient, channel_id: i64) -> Self {
        Self {
            telegram,
            channel_id,
        }
    }
}

#[async_trait]
impl Publisher for ChannelPublisher {
    async fn publish(&self, posting: &PostingWithAuthor) -> Result<i64> {
        let text = render::channel_post(&posting.posting);
        let message_id = self.telegram.send_text(self.channel_id, &text).await?;
        tracing::info!(
            posting_id = %posting.posting.id,
            channel_message_id = message_id,
            "Posting published to channel"
        );
        Ok(message_id)
    }

    async fn delete(&self, channel_message_id: i64) -> Result<()> {
        self.telegram
            .delete_message(self.channel_id, channel_message_id)
            .await
    }
}
