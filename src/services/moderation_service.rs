use std::sync::Arc;

use crate::error::Result;
use crate::models::callback::{ModerationAction, ModerationKind};
use crate::models::keyboard::Keyboard;
use crate::models::posting::Language;
use crate::services::posting_service::PostingService;
use crate::services::telegram_service::ChatTransport;
use crate::utils::i18n::{fill, messages};
use crate::utils::render;

/// The admin message a moderation button was pressed on.
#[derive(Debug, Clone)]
pub struct AdminMessage {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: String,
}

/// Handles moderation buttons on admin cards.
#[derive(Clone)]
pub struct ModerationService {
    postings: PostingService,
    transport: Arc<dyn ChatTransport>,
    language: Language,
}

impl ModerationService {
    pub fn new(postings: PostingService, transport: Arc<dyn ChatTransport>) -> Self {
        let language = postings.config().default_language;
        Self {
            postings,
            transport,
            language,
        }
    }

    /// Returns the toast text for the callback answer, if any.
    ///
    /// A repeated tap on a button whose transition already happened is a
    /// no-op: the posting and the admin message are left as they are.
    pub async fn handle(
        &self,
        admin_id: i64,
        message: &AdminMessage,
        action: ModerationAction,
    ) -> Result<Option<&'static str>> {
        let m = messages(self.language);
        if !self.postings.is_admin(admin_id) {
            tracing::warn!(admin_id, posting_id = %action.posting_id, "Moderation button pressed by non-admin");
            return Ok(Some(m.admin_not_authorized));
        }

        let id = action.posting_id;
        let result = match action.kind {
            ModerationKind::Approve => self.postings.approve(id, admin_id).await.map(|_| {
                (
                    render::annotate(&message.text, m.admin_approved),
                    render::delete_keyboard(id, self.language),
                )
            }),
            ModerationKind::Reject => self.postings.reject(id, admin_id, None).await.map(|_| {
                (
                    render::annotate(&message.text, m.admin_rejected),
                    Keyboard::empty(),
                )
            }),
            ModerationKind::RequestDelete => Ok((
                render::annotate(strip_confirmation(&message.text, m.admin_confirm_delete), m.admin_confirm_delete),
                render::confirm_delete_keyboard(id, self.language),
            )),
            ModerationKind::CancelDelete => Ok((
                strip_confirmation(&message.text, m.admin_confirm_delete).to_string(),
                render::delete_keyboard(id, self.language),
            )),
            ModerationKind::ConfirmDelete => self.postings.archive(id, admin_id).await.map(|_| {
                (
                    render::annotate(
                        strip_confirmation(&message.text, m.admin_confirm_delete),
                        m.admin_removed,
                    ),
                    Keyboard::empty(),
                )
            }),
        };

        match result {
            Ok((text, keyboard)) => {
                self.edit(message, &text, &keyboard).await;
                Ok(None)
            }
            Err(e) if e.is_invalid_transition() => {
                tracing::debug!(posting_id = %id, admin_id, error = %e, "Ignoring repeated moderation action");
                Ok(None)
            }
            Err(e) => {
                tracing::error!(posting_id = %id, admin_id, error = %e, "Moderation action failed");
                let text = fill(m.admin_action_failed, &[("error", &e.to_string())]);
                if let Err(send_err) = self.transport.send_text(message.chat_id, &text).await {
                    tracing::warn!(admin_id, error = %send_err, "Failed to report moderation failure");
                }
                Ok(None)
            }
        }
    }

    async fn edit(&self, message: &AdminMessage, text: &str, keyboard: &Keyboard) {
        if let Err(e) = self
            .transport
            .edit_message(message.chat_id, message.message_id, text, keyboard)
            .await
        {
            tracing::warn!(
                chat_id = message.chat_id,
                message_id = message.message_id,
                error = %e,
                "Failed to update admin message"
            );
        }
    }
}

fn strip_confirmation<'a>(text: &'a str, confirmation: &str) -> &'a str {
    text.strip_suffix(confirmation)
        .and_then(|rest| rest.strip_suffix("\n\n"))
        .unwrap_or(text)
}
