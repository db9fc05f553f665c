use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::posting_dto::{
        CreatePostingPayload, CreatePostingResponse, PostingListResponse, PostingResponse,
        RejectPostingPayload,
    },
    error::Result,
    middleware::identity::TelegramIdentity,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/postings",
    request_body = CreatePostingPayload,
    responses(
        (status = 201, description = "Posting submitted for moderation", body = Json<CreatePostingResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing X-Telegram-ID header")
    )
)]
#[axum::debug_handler]
pub async fn create_posting(
    State(state): State<AppState>,
    identity: TelegramIdentity,
    Json(payload): Json<CreatePostingPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let posting = payload.into_new_posting(state.config.default_language)?;
    let created = state.postings.submit(&identity.0, posting).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatePostingResponse {
            id: created.id,
            status: created.status,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/postings/pending",
    responses(
        (status = 200, description = "Postings awaiting moderation, oldest first", body = Json<PostingListResponse>),
        (status = 401, description = "Missing X-Telegram-ID header"),
        (status = 403, description = "Caller is not an admin")
    )
)]
#[axum::debug_handler]
pub async fn list_pending(
    State(state): State<AppState>,
    identity: TelegramIdentity,
) -> Result<impl IntoResponse> {
    let pending = state.postings.list_pending(identity.telegram_id()).await?;
    let items: Vec<PostingResponse> = pending.into_iter().map(PostingResponse::from).collect();
    Ok(Json(PostingListResponse {
        total: items.len(),
        items,
    }))
}

#[utoipa::path(
    get,
    path = "/api/postings/stats",
    responses(
        (status = 200, description = "Posting counts by status"),
        (status = 401, description = "Missing X-Telegram-ID header"),
        (status = 403, description = "Caller is not an admin")
    )
)]
#[axum::debug_handler]
pub async fn get_stats(
    State(state): State<AppState>,
    identity: TelegramIdentity,
) -> Result<impl IntoResponse> {
    let stats = state.postings.stats(identity.telegram_id()).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    post,
    path = "/api/postings/{id}/approve",
    params(
        ("id" = Uuid, Path, description = "Posting ID")
    ),
    responses(
        (status = 200, description = "Posting approved and published", body = Json<PostingResponse>),
        (status = 400, description = "Posting is not pending"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Posting not found"),
        (status = 502, description = "Channel publication failed, posting stays approved")
    )
)]
#[axum::debug_handler]
pub async fn approve_posting(
    State(state): State<AppState>,
    identity: TelegramIdentity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let posting = state.postings.approve(id, identity.telegram_id()).await?;
    Ok(Json(PostingResponse::from(posting)))
}

#[utoipa::path(
    post,
    path = "/api/postings/{id}/reject",
    params(
        ("id" = Uuid, Path, description = "Posting ID")
    ),
    request_body = RejectPostingPayload,
    responses(
        (status = 200, description = "Posting rejected", body = Json<PostingResponse>),
        (status = 400, description = "Posting is not pending"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Posting not found")
    )
)]
#[axum::debug_handler]
pub async fn reject_posting(
    State(state): State<AppState>,
    identity: TelegramIdentity,
    Path(id): Path<Uuid>,
    payload: Option<Json<RejectPostingPayload>>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload.unwrap_or_default();
    payload.validate()?;
    let reason = payload
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());
    let posting = state
        .postings
        .reject(id, identity.telegram_id(), reason)
        .await?;
    Ok(Json(PostingResponse::from(posting)))
}

#[utoipa::path(
    post,
    path = "/api/postings/{id}/archive",
    params(
        ("id" = Uuid, Path, description = "Posting ID")
    ),
    responses(
        (status = 200, description = "Posting archived and removed from the channel", body = Json<PostingResponse>),
        (status = 400, description = "Posting is not published"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Posting not found")
    )
)]
#[axum::debug_handler]
pub async fn archive_posting(
    State(state): State<AppState>,
    identity: TelegramIdentity,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let posting = state.postings.archive(id, identity.telegram_id()).await?;
    Ok(Json(PostingResponse::from(posting)))
}
