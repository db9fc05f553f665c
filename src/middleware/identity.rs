use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::error::Error;
use crate::models::user::Sender;

pub const TELEGRAM_ID_HEADER: &str = "x-telegram-id";
pub const TELEGRAM_USERNAME_HEADER: &str = "x-telegram-username";

/// Caller identity taken from the `X-Telegram-ID` header. Whether the caller
/// is an admin is decided by the service, not here.
#[derive(Debug, Clone)]
pub struct TelegramIdentity(pub Sender);

impl TelegramIdentity {
    pub fn telegram_id(&self) -> i64 {
        self.0.telegram_id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for TelegramIdentity
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(TELEGRAM_ID_HEADER) else {
            return Err(Error::Unauthorized("Missing X-Telegram-ID header".to_string()));
        };
        let telegram_id = raw
            .to_str()
            .ok()
            .and_then(|value| value.trim().parse::<i64>().ok())
            .ok_or_else(|| Error::Unauthorized("Invalid X-Telegram-ID header".to_string()))?;

        let username = parts
            .headers
            .get(TELEGRAM_USERNAME_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().trim_start_matches('@').to_string())
            .filter(|value| !value.is_empty());

        Ok(Self(Sender::new(telegram_id, username)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<TelegramIdentity, Error> {
        let (mut parts, _) = request.into_parts();
        TelegramIdentity::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn reads_id_and_username() {
        let request = Request::builder()
            .header("X-Telegram-ID", "42")
            .header("X-Telegram-Username", "@ann")
            .body(())
            .unwrap();
        let identity = extract(request).await.unwrap();
        assert_eq!(identity.telegram_id(), 42);
        assert_eq!(identity.0.username.as_deref(), Some("ann"));
    }

    #[tokio::test]
    async fn missing_or_garbage_id_is_unauthorized() {
        let missing = Request::builder().body(()).unwrap();
        assert!(matches!(extract(missing).await, Err(Error::Unauthorized(_))));

        let garbage = Request::builder()
            .header("X-Telegram-ID", "abc")
            .body(())
            .unwrap();
        assert!(matches!(extract(garbage).await, Err(Error::Unauthorized(_))));
    }
}
