use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use chirp_types::api::{NewMessage, UpdateMessageText};

use crate::{AppState, failure_status, run_blocking};

/// POST /messages — 200 with the stored message, 400 on rejection
/// (bad text, unknown posting account).
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewMessage>,
) -> Result<impl IntoResponse, StatusCode> {
    let outcome =
        run_blocking(move || state.messages.create(req.posted_by, &req.text, req.posted_at))
            .await?;

    match outcome {
        Ok(message) => Ok(Json(message)),
        Err(err) => Err(failure_status(err, StatusCode::BAD_REQUEST)),
    }
}

/// GET /messages — 200 with every message; an empty store is an empty array.
pub async fn list_all(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let outcome = run_blocking(move || state.messages.list_all()).await?;

    match outcome {
        Ok(list) => Ok(Json(list)),
        Err(err) => Err(failure_status(err, StatusCode::BAD_REQUEST)),
    }
}

/// GET /messages/{message_id} — always 200; a missing message is an empty
/// body, not an error.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, StatusCode> {
    let outcome = run_blocking(move || state.messages.get_by_id(message_id)).await?;

    match outcome {
        Ok(Some(message)) => Ok(Json(message).into_response()),
        Ok(None) => Ok(StatusCode::OK.into_response()),
        Err(err) => Err(failure_status(err, StatusCode::BAD_REQUEST)),
    }
}

/// PATCH /messages/{message_id} — 200 with the full updated message, 400
/// when the text is invalid or the message no longer exists.
pub async fn update(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
    Json(req): Json<UpdateMessageText>,
) -> Result<impl IntoResponse, StatusCode> {
    let outcome = run_blocking(move || state.messages.update(message_id, &req.text)).await?;

    match outcome {
        Ok(message) => Ok(Json(message)),
        Err(err) => Err(failure_status(err, StatusCode::BAD_REQUEST)),
    }
}

/// DELETE /messages/{message_id} — idempotent: 200 with the deleted message
/// when it existed, 200 with an empty body when it did not.
pub async fn delete(
    State(state): State<AppState>,
    Path(message_id): Path<i64>,
) -> Result<Response, StatusCode> {
    let outcome = run_blocking(move || state.messages.delete(message_id)).await?;

    match outcome {
        Ok(Some(message)) => Ok(Json(message).into_response()),
        Ok(None) => Ok(StatusCode::OK.into_response()),
        Err(err) => Err(failure_status(err, StatusCode::BAD_REQUEST)),
    }
}

/// GET /accounts/{account_id}/messages — 200 with the account's messages;
/// an unknown account is an empty array, not a 404.
pub async fn list_by_account(
    State(state): State<AppState>,
    Path(account_id): Path<i64>,
) -> Result<impl IntoResponse, StatusCode> {
    let outcome = run_blocking(move || state.messages.list_by_account(account_id)).await?;

    match outcome {
        Ok(list) => Ok(Json(list)),
        Err(err) => Err(failure_status(err, StatusCode::BAD_REQUEST)),
    }
}
