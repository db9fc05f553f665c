use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use crate::error::{Error, Result};
use crate::models::keyboard::{ButtonTarget, Keyboard};

const MAX_ATTEMPTS: u32 = 3;
const BASE_BACKOFF: Duration = Duration::from_millis(500);

/// Outbound side of the chat. Message ids are the Bot API's.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<i64>;

    async fn send_with_controls(&self, chat_id: i64, text: &str, keyboard: &Keyboard)
        -> Result<i64>;

    /// Replaces text and controls of an earlier message. An empty keyboard
    /// removes the controls.
    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<()>;

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    retry_after: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookInfo {
    #[serde(default)]
    pub url: String,
}

fn keyboard_markup(keyboard: &Keyboard) -> JsonValue {
    let rows: Vec<Vec<JsonValue>> = keyboard
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| match &button.target {
                    ButtonTarget::Callback(action) => {
                        json!({ "text": button.label, "callback_data": action.encode() })
                    }
                    ButtonTarget::Url(url) => json!({ "text": button.label, "url": url }),
                })
                .collect()
        })
        .collect();
    json!({ "inline_keyboard": rows })
}

enum Attempt<T> {
    Done(Result<T>),
    Retry(Error, Option<Duration>),
}

/// Whether a call may reach Telegram twice without a visible effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Replay {
    Safe,
    /// Retried only when Telegram provably did not process the request:
    /// the connection was never established, or a 429 was returned.
    OnlyUnsent,
}

/// Bot API client.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(client: Client, api_url: &str, bot_token: &str) -> Self {
        Self {
            client,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &JsonValue,
        replay: Replay,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, method);
        let mut attempt = 1;
        loop {
            match self.try_call(&url, body, replay).await {
                Attempt::Done(result) => return result,
                Attempt::Retry(err, retry_after) if attempt < MAX_ATTEMPTS => {
                    let delay = retry_after.unwrap_or(BASE_BACKOFF * 2u32.pow(attempt - 1));
                    tracing::warn!(
                        method,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Telegram call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Attempt::Retry(err, _) => return Err(err),
            }
        }
    }

    async fn try_call<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &JsonValue,
        replay: Replay,
    ) -> Attempt<T> {
        let safe = replay == Replay::Safe;
        let response = match self.client.post(url).json(body).send().await {
            Ok(response) => response,
            Err(err) if err.is_connect() => return Attempt::Retry(err.into(), None),
            Err(err) if safe && (err.is_timeout() || err.is_request()) => {
                return Attempt::Retry(err.into(), None)
            }
            Err(err) => return Attempt::Done(Err(err.into())),
        };

        let status = response.status();
        let parsed = match response.json::<ApiResponse<T>>().await {
            Ok(parsed) => parsed,
            Err(err) if safe && status.is_server_error() => {
                return Attempt::Retry(err.into(), None)
            }
            Err(err) => return Attempt::Done(Err(err.into())),
        };

        if parsed.ok {
            return Attempt::Done(
                parsed
                    .result
                    .ok_or_else(|| Error::Telegram("response without result".to_string())),
            );
        }

        let description = parsed
            .description
            .unwrap_or_else(|| format!("HTTP {}", status));
        let err = Error::Telegram(description);
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = parsed
                .parameters
                .and_then(|p| p.retry_after)
                .map(Duration::from_secs);
            return Attempt::Retry(err, retry_after);
        }
        if safe && status.is_server_error() {
            return Attempt::Retry(err, None);
        }
        Attempt::Done(Err(err))
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<i64> {
        let mut body = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
            "disable_web_page_preview": true,
        });
        if let Some(keyboard) = keyboard {
            body["reply_markup"] = keyboard_markup(keyboard);
        }
        // never resent once Telegram may have accepted it
        let sent: SentMessage = self.call("sendMessage", &body, Replay::OnlyUnsent).await?;
        Ok(sent.message_id)
    }

    pub async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<()> {
        let body = json!({ "chat_id": chat_id, "message_id": message_id });
        let _: bool = self.call("deleteMessage", &body, Replay::Safe).await?;
        Ok(())
    }

    pub async fn get_webhook_info(&self) -> Result<WebhookInfo> {
        self.call("getWebhookInfo", &json!({}), Replay::Safe).await
    }

    pub async fn set_webhook(&self, url: &str, secret_token: Option<&str>) -> Result<()> {
        let mut body = json!({
            "url": url,
            "allowed_updates": ["message", "callback_query"],
        });
        if let Some(secret) = secret_token {
            body["secret_token"] = json!(secret);
        }
        let _: bool = self.call("setWebhook", &body, Replay::Safe).await?;
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<i64> {
        self.send_message(chat_id, text, None).await
    }

    async fn send_with_controls(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<i64> {
        self.send_message(chat_id, text, Some(keyboard)).await
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<()> {
        let body = json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "text": text,
            "reply_markup": keyboard_markup(keyboard),
        });
        // editMessageText answers with the edited message
        let _: JsonValue = self.call("editMessageText", &body, Replay::Safe).await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        let mut body = json!({ "callback_query_id": callback_id });
        if let Some(text) = text {
            body["text"] = json!(text);
        }
        let _: bool = self.call("answerCallbackQuery", &body, Replay::Safe).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::callback::{CallbackAction, UserAction};
    use crate::models::keyboard::Button;

    #[test]
    fn keyboard_serializes_to_inline_markup() {
        let keyboard = Keyboard::new(vec![vec![
            Button::callback("Submit", CallbackAction::Conversation(UserAction::Submit)),
            Button::url("Contact", "https://t.me/acme"),
        ]]);
        let markup = keyboard_markup(&keyboard);
        assert_eq!(markup["inline_keyboard"][0][0]["callback_data"], "submit");
        assert_eq!(markup["inline_keyboard"][0][1]["url"], "https://t.me/acme");
    }

    #[test]
    fn empty_keyboard_clears_controls() {
        let markup = keyboard_markup(&Keyboard::empty());
        assert_eq!(markup, json!({ "inline_keyboard": [] }));
    }

    #[test]
    fn base_url_embeds_token() {
        let client = TelegramClient::new(Client::new(), "https://api.telegram.org/", "1:abc");
        assert_eq!(client.base_url, "https://api.telegram.org/bot1:abc");
    }
}
