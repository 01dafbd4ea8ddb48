//! Development trigger endpoint.
//!
//! `POST /trigger` with an event payload body runs one dispatch directly,
//! bypassing the queue. Only mounted when `DEV_TRIGGER_ADDR` is set; there is
//! no auth on it, so it must never be exposed in production.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router, extract::State};

use crescendo_common::error::AppError;
use crescendo_common::types::EventPayload;
use crescendo_dispatch::{Dispatcher, TelegramClient};
use crescendo_store::HttpStore;

/// State shared with the trigger handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher<HttpStore, TelegramClient>>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/trigger", post(trigger))
        .with_state(state)
}

async fn trigger(
    State(state): State<AppState>,
    Json(payload): Json<EventPayload>,
) -> Result<StatusCode, AppError> {
    tracing::info!(kind = payload.kind(), "Dev trigger received payload");
    state.dispatcher.dispatch(&payload).await?;
    Ok(StatusCode::NO_CONTENT)
}
