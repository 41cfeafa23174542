use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use chirp_types::api::Credentials;

use crate::{AppState, failure_status, run_blocking};

/// POST /register — 200 with the stored account, 400 on any rejection
/// (blank username, short password, taken username).
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<impl IntoResponse, StatusCode> {
    let outcome =
        run_blocking(move || state.accounts.register(&req.username, &req.password)).await?;

    match outcome {
        Ok(account) => Ok(Json(account)),
        Err(err) => Err(failure_status(err, StatusCode::BAD_REQUEST)),
    }
}

/// POST /login — 200 with the matching account, 401 when no account has
/// exactly these credentials.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<impl IntoResponse, StatusCode> {
    let outcome =
        run_blocking(move || state.accounts.authenticate(&req.username, &req.password)).await?;

    match outcome {
        Ok(account) => Ok(Json(account)),
        Err(err) => Err(failure_status(err, StatusCode::UNAUTHORIZED)),
    }
}
