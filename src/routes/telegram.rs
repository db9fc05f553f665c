use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use subtle::ConstantTimeEq;

use crate::{dto::telegram_dto::TelegramUpdate, error::Result, AppState};

pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

fn secret_matches(expected: &str, headers: &HeaderMap) -> bool {
    headers
        .get(SECRET_TOKEN_HEADER)
        .map(|provided| bool::from(provided.as_bytes().ct_eq(expected.as_bytes())))
        .unwrap_or(false)
}

/// Telegram retries any non-2xx answer, so processing errors are logged and
/// the update is still acknowledged.
#[utoipa::path(
    post,
    path = "/api/webhook/telegram",
    request_body = TelegramUpdate,
    responses(
        (status = 200, description = "Update accepted"),
        (status = 401, description = "Secret token mismatch")
    )
)]
#[axum::debug_handler]
pub async fn telegram_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<TelegramUpdate>,
) -> Result<impl IntoResponse> {
    if let Some(secret) = state.config.telegram_webhook_secret.as_deref() {
        if !secret_matches(secret, &headers) {
            tracing::warn!(update_id = update.update_id, "Rejected webhook call with bad secret token");
            return Ok(StatusCode::UNAUTHORIZED);
        }
    }

    let update_id = update.update_id;
    if let Err(e) = state.bot.handle_update(update).await {
        tracing::error!(update_id, error = %e, "Failed to process Telegram update");
    }
    Ok(StatusCode::OK)
}
