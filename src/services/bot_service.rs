use std::sync::Arc;

use crate::dto::telegram_dto::{CallbackQuery, TelegramMessage, TelegramUpdate};
use crate::error::Result;
use crate::models::callback::CallbackAction;
use crate::models::posting::Language;
use crate::models::user::Sender;
use crate::services::conversation_service::{ConversationService, Input};
use crate::services::moderation_service::{AdminMessage, ModerationService};
use crate::services::posting_service::PostingService;
use crate::services::telegram_service::ChatTransport;
use crate::utils::i18n::{fill, messages};
use crate::utils::render;

/// Entry point for webhook updates: commands, free text and button taps.
#[derive(Clone)]
pub struct BotService {
    conversation: ConversationService,
    moderation: ModerationService,
    postings: PostingService,
    transport: Arc<dyn ChatTransport>,
}

impl BotService {
    pub fn new(
        conversation: ConversationService,
        moderation: ModerationService,
        postings: PostingService,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            conversation,
            moderation,
            postings,
            transport,
        }
    }

    pub async fn handle_update(&self, update: TelegramUpdate) -> Result<()> {
        if let Some(query) = update.callback_query {
            return self.handle_callback(query).await;
        }
        if let Some(message) = update.message {
            return self.handle_message(message).await;
        }
        tracing::debug!(update_id = update.update_id, "Ignoring update without message or callback");
        Ok(())
    }

    async fn handle_message(&self, message: TelegramMessage) -> Result<()> {
        let Some(from) = message.from.as_ref() else {
            return Ok(());
        };
        if from.is_bot {
            return Ok(());
        }
        let sender = Sender::from(from);
        let chat_id = message.chat.id;

        if let Some(command) = message.command() {
            return self.handle_command(&sender, chat_id, command).await;
        }

        let input = match &message.text {
            Some(text) => Input::Text(text.clone()),
            None if message.has_attachment() => Input::Attachment,
            None => return Ok(()),
        };
        self.conversation.handle(&sender, chat_id, input).await
    }

    async fn handle_command(&self, sender: &Sender, chat_id: i64, command: &str) -> Result<()> {
        let user_id = sender.telegram_id;
        tracing::debug!(user_id, command, "Command received");
        let lang = self.conversation.interface_language(user_id).await;
        let m = messages(lang);

        match command {
            "start" => {
                self.postings.repository().get_or_create_user(sender).await?;
                self.send(chat_id, m.welcome).await;
            }
            "help" => {
                let text = if self.postings.is_admin(user_id) {
                    format!("{}{}", m.help, m.help_admin)
                } else {
                    m.help.to_string()
                };
                self.send(chat_id, &text).await;
            }
            "post_job" | "post" => {
                self.postings.repository().get_or_create_user(sender).await?;
                self.conversation.handle(sender, chat_id, Input::Start).await?;
            }
            "cancel" => {
                self.conversation.handle(sender, chat_id, Input::Cancel).await?;
            }
            "language" => {
                if let Err(e) = self
                    .transport
                    .send_with_controls(chat_id, m.choose_language, &render::language_keyboard(lang))
                    .await
                {
                    tracing::warn!(chat_id, error = %e, "Failed to send language picker");
                }
            }
            "pricing" | "prices" => {
                let contacts = &self.postings.config().support_contacts;
                self.send(chat_id, &render::pricing(contacts, lang)).await;
            }
            "faq" => self.send(chat_id, m.faq).await,
            "about" => self.send(chat_id, m.about).await,
            "contact" => {
                let contacts = &self.postings.config().support_contacts;
                self.send(chat_id, &render::contact_info(contacts, lang)).await;
            }
            "myjobs" => {
                let postings = self.postings.list_by_author(user_id).await?;
                self.send(chat_id, &render::posting_list(&postings, lang)).await;
            }
            "pending" | "stats" | "admins" if !self.postings.is_admin(user_id) => {
                tracing::warn!(user_id, command, "Admin command from non-admin");
                self.send(chat_id, m.no_permission).await;
            }
            "pending" => self.send_pending(user_id, chat_id).await?,
            "stats" => {
                let stats = self.postings.stats(user_id).await?;
                self.send(chat_id, &render::stats(&stats, lang)).await;
            }
            "admins" => {
                let mut text = String::from(m.admins_title);
                for id in &self.postings.config().admin_telegram_ids {
                    text.push_str(&format!("\n• `{}`", id));
                }
                self.send(chat_id, &text).await;
            }
            _ => self.send(chat_id, m.unknown_command).await,
        }
        Ok(())
    }

    async fn send_pending(&self, admin_id: i64, chat_id: i64) -> Result<()> {
        let lang = self.postings.config().default_language;
        let m = messages(lang);
        let pending = self.postings.list_pending(admin_id).await?;
        if pending.is_empty() {
            self.send(chat_id, m.no_pending).await;
            return Ok(());
        }

        let count = pending.len().to_string();
        self.send(chat_id, &fill(m.pending_count, &[("count", &count)]))
            .await;
        for item in &pending {
            let card = render::admin_card(&item.posting, lang);
            let keyboard = render::moderation_keyboard(&item.posting, lang);
            if let Err(e) = self.transport.send_with_controls(chat_id, &card, &keyboard).await {
                tracing::warn!(posting_id = %item.posting.id, error = %e, "Failed to send pending card");
            }
        }
        Ok(())
    }

    async fn handle_callback(&self, query: CallbackQuery) -> Result<()> {
        let sender = Sender::from(&query.from);
        let toast = match query.data.as_deref().map(str::parse::<CallbackAction>) {
            Some(Ok(action)) => self.dispatch_callback(&sender, &query, action).await,
            Some(Err(e)) => {
                tracing::warn!(user_id = sender.telegram_id, error = %e, "Unrecognised callback");
                Ok(None)
            }
            None => Ok(None),
        };

        // Always answered, or the client keeps showing a spinner.
        if let Err(e) = self.transport.answer_callback(&query.id, toast.as_ref().ok().copied().flatten()).await {
            tracing::warn!(callback_id = %query.id, error = %e, "Failed to answer callback");
        }
        toast.map(|_| ())
    }

    async fn dispatch_callback(
        &self,
        sender: &Sender,
        query: &CallbackQuery,
        action: CallbackAction,
    ) -> Result<Option<&'static str>> {
        let chat_id = query
            .message
            .as_ref()
            .map(|msg| msg.chat.id)
            .unwrap_or(sender.telegram_id);

        match action {
            CallbackAction::InterfaceLanguage(language) => {
                self.set_language(sender, chat_id, language).await?;
                Ok(None)
            }
            CallbackAction::Conversation(user_action) => {
                self.conversation
                    .handle(sender, chat_id, Input::Action(user_action))
                    .await?;
                Ok(None)
            }
            CallbackAction::Moderation(moderation) => {
                let Some(message) = query.message.as_ref() else {
                    tracing::warn!(posting_id = %moderation.posting_id, "Moderation callback without message");
                    return Ok(None);
                };
                let admin_message = AdminMessage {
                    chat_id: message.chat.id,
                    message_id: message.message_id,
                    text: message.text.clone().unwrap_or_default(),
                };
                self.moderation
                    .handle(sender.telegram_id, &admin_message, moderation)
                    .await
            }
        }
    }

    async fn set_language(&self, sender: &Sender, chat_id: i64, language: Language) -> Result<()> {
        let repo = self.postings.repository();
        repo.get_or_create_user(sender).await?;
        repo.set_interface_language(sender.telegram_id, language).await?;
        tracing::info!(user_id = sender.telegram_id, language = language.as_str(), "Interface language changed");
        self.send(chat_id, messages(language).language_set).await;
        Ok(())
    }

    async fn send(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.transport.send_text(chat_id, text).await {
            tracing::warn!(chat_id, error = %e, "Failed to send message");
        }
    }
}
