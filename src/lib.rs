pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::database::{PgRepository, Repository};
use crate::error::Result;
use crate::services::{
    bot_service::BotService,
    conversation_service::ConversationService,
    expiry_service::ExpiryService,
    moderation_service::ModerationService,
    notification_service::{AdminNotifier, TelegramAdminNotifier},
    posting_service::PostingService,
    publisher_service::{ChannelPublisher, Publisher},
    session_store::SessionStore,
    telegram_service::{ChatTransport, TelegramClient},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub postings: PostingService,
    pub conversation: ConversationService,
    pub moderation: ModerationService,
    pub expiry: ExpiryService,
    pub bot: BotService,
}

impl AppState {
    pub fn new(pool: PgPool, config: Arc<Config>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let telegram = TelegramClient::new(
            http_client,
            &config.telegram_api_url,
            &config.telegram_bot_token,
        );

        let transport: Arc<dyn ChatTransport> = Arc::new(telegram.clone());
        let publisher = Arc::new(ChannelPublisher::new(telegram, config.channel_id));
        let notifier = Arc::new(TelegramAdminNotifier::new(
            transport.clone(),
            config.admin_telegram_ids.clone(),
            config.default_language,
        ));
        let repo = Arc::new(PgRepository::new(pool));

        Ok(Self::from_parts(repo, publisher, notifier, transport, config))
    }

    /// Wires the services over arbitrary collaborators.
    pub fn from_parts(
        repo: Arc<dyn Repository>,
        publisher: Arc<dyn Publisher>,
        notifier: Arc<dyn AdminNotifier>,
        transport: Arc<dyn ChatTransport>,
        config: Arc<Config>,
    ) -> Self {
        let postings = PostingService::new(
            repo,
            publisher,
            notifier,
            transport.clone(),
            config.clone(),
        );
        let conversation = ConversationService::new(
            Arc::new(SessionStore::new()),
            postings.clone(),
            transport.clone(),
        );
        let moderation = ModerationService::new(postings.clone(), transport.clone());
        let expiry = ExpiryService::new(postings.clone());
        let bot = BotService::new(
            conversation.clone(),
            moderation.clone(),
            postings.clone(),
            transport,
        );

        Self {
            config,
            postings,
            conversation,
            moderation,
            expiry,
            bot,
        }
    }
}
