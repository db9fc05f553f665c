use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::models::user::Sender;

/// Subset of the Bot API `Update` object the bot reacts to.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUpdate {
    pub update_id: i64,
    pub message: Option<TelegramMessage>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramMessage {
    pub message_id: i64,
    pub from: Option<TelegramUser>,
    pub chat: TelegramChat,
    pub text: Option<String>,
    pub photo: Option<JsonValue>,
    pub document: Option<JsonValue>,
    pub video: Option<JsonValue>,
    pub voice: Option<JsonValue>,
    pub audio: Option<JsonValue>,
    pub sticker: Option<JsonValue>,
}

impl TelegramMessage {
    pub fn has_attachment(&self) -> bool {
        self.photo.is_some()
            || self.document.is_some()
            || self.video.is_some()
            || self.voice.is_some()
            || self.audio.is_some()
            || self.sticker.is_some()
    }

    /// `/post_job@BridgeJobsBot extra` -> `post_job`
    pub fn command(&self) -> Option<&str> {
        let text = self.text.as_deref()?.trim();
        let first = text.split_whitespace().next()?;
        let command = first.strip_prefix('/')?;
        let command = command.split('@').next().unwrap_or(command);
        (!command.is_empty()).then_some(command)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub username: Option<String>,
}

impl From<&TelegramUser> for Sender {
    fn from(user: &TelegramUser) -> Self {
        Sender::new(user.id, user.username.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramChat {
    pub id: i64,
    pub r#type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: TelegramUser,
    pub message: Option<TelegramMessage>,
    pub data: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(text: Option<&str>) -> TelegramMessage {
        serde_json::from_value(json!({
            "message_id": 1,
            "from": { "id": 5, "first_name": "Ann" },
            "chat": { "id": 5, "type": "private" },
            "text": text,
        }))
        .unwrap()
    }

    #[test]
    fn commands_drop_bot_mention_and_arguments() {
        assert_eq!(message(Some("/post_job@BridgeJobsBot now")).command(), Some("post_job"));
        assert_eq!(message(Some("/start")).command(), Some("start"));
        assert_eq!(message(Some("hello /start")).command(), None);
        assert_eq!(message(Some("/")).command(), None);
        assert_eq!(message(None).command(), None);
    }

    #[test]
    fn document_is_an_attachment() {
        let msg: TelegramMessage = serde_json::from_value(json!({
            "message_id": 2,
            "chat": { "id": 5, "type": "private" },
            "document": { "file_id": "abc" },
        }))
        .unwrap();
        assert!(msg.has_attachment());
        assert!(msg.text.is_none());
    }

    #[test]
    fn callback_update_parses() {
        let update: TelegramUpdate = serde_json::from_value(json!({
            "update_id": 10,
            "callback_query": {
                "id": "cb1",
                "from": { "id": 900, "first_name": "Admin", "username": "boss" },
                "message": {
                    "message_id": 77,
                    "chat": { "id": 900, "type": "private" },
                    "text": "card"
                },
                "data": "submit"
            }
        }))
        .unwrap();
        let query = update.callback_query.unwrap();
        assert_eq!(query.data.as_deref(), Some("submit"));
        assert_eq!(Sender::from(&query.from).username.as_deref(), Some("boss"));
    }
}
