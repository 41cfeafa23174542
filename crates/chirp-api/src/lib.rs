//! HTTP surface: translates requests into core operations and core
//! outcomes into status codes. Rejections become client errors, absence
//! becomes an empty 200 body, store faults become 500.

pub mod auth;
pub mod messages;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tracing::{debug, error};

use chirp_core::{AccountService, MessageService, ServiceError};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub accounts: AccountService,
    pub messages: MessageService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/messages", post(messages::create).get(messages::list_all))
        .route(
            "/messages/{message_id}",
            get(messages::get_by_id)
                .patch(messages::update)
                .delete(messages::delete),
        )
        .route(
            "/accounts/{account_id}/messages",
            get(messages::list_by_account),
        )
        .with_state(state)
}

/// Run a synchronous core operation off the async runtime.
pub(crate) async fn run_blocking<T, F>(f: F) -> Result<T, StatusCode>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Map a failed core outcome to a status code: business rejections get the
/// handler's client-error code, store faults always get 500.
pub(crate) fn failure_status(err: ServiceError, rejected: StatusCode) -> StatusCode {
    if err.is_rejection() {
        debug!("request rejected: {}", err);
        rejected
    } else {
        error!("store fault: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
