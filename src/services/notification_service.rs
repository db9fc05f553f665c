use std::sync::Arc;

use async_trait::async_trait;

use crate::models::posting::{Language, Posting};
use crate::services::telegram_service::ChatTransport;
use crate::utils::render;

/// Tells moderators about fresh submissions. Delivery is best-effort.
#[async_trait]
pub trait AdminNotifier: Send + Sync {
    async fn notify_new_submission(&self, posting: &Posting);
}

#[derive(Clone)]
pub struct TelegramAdminNotifier {
    transport: Arc<dyn ChatTransport>,
    admin_ids: Vec<i64>,
    language: Language,
}

impl TelegramAdminNotifier {
    pub fn new(transport: Arc<dyn ChatTransport>, admin_ids: Vec<i64>, language: Language) -> Self {
        Self {
            transport,
            admin_ids,
            language,
        }
    }
}

#[async_trait]
impl AdminNotifier for TelegramAdminNotifier {
    async fn notify_new_submission(&self, posting: &Posting) {
        let text = render::admin_card(posting, self.language);
        let keyboard = render::moderation_keyboard(posting, self.language);

        for admin_id in &self.admin_ids {
            if let Err(e) = self
                .transport
                .send_with_controls(*admin_id, &text, &keyboard)
                .await
            {
                tracing::warn!(
                    posting_id = %posting.id,
                    admin_id,
                    error = %e,
                    "Failed to notify admin"
                );
            }
        }
    }
}
