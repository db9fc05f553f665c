pub mod bot_service;
pub mod conversation_service;
pub mod expiry_service;
pub mod moderation_service;
pub mod notification_service;
pub mod posting_service;
pub mod publisher_service;
pub mod session_store;
pub mod telegram_service;
