//! HTTP request handlers.

use super::types::HealthResponse;
use super::AppState;
use crate::error::{AppError, AppResult};
use crate::events::{self, Dispatch, MessageEvent};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, info};

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let image_count = state.images.count().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        image_count,
    }))
}

/// Slack Events API webhook.
///
/// The signature covers the raw body, so it is checked before anything is
/// decoded.
pub async fn slack_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Response> {
    state.verifier.verify(&headers, &body)?;

    match events::parse(&body)?.dispatch() {
        Dispatch::Challenge(challenge) => {
            info!("Answering URL verification handshake");
            let response = ([(header::CONTENT_TYPE, "text/plain")], challenge);
            Ok(response.into_response())
        }
        Dispatch::Message(message) => {
            handle_message(&state, message).await?;
            Ok(StatusCode::OK.into_response())
        }
        Dispatch::Ignore => {
            debug!("Ignoring event");
            Ok(StatusCode::OK.into_response())
        }
    }
}

async fn handle_message(state: &AppState, message: MessageEvent) -> AppResult<()> {
    let reply = tokio::time::timeout(state.request_timeout, state.router.route(&message.text))
        .await
        .map_err(|_| AppError::Timeout(state.request_timeout))??;

    let Some(reply) = reply else {
        return Ok(());
    };

    info!(channel = %message.channel, user = ?message.user, "Replying to command");

    // The event is acknowledged even when the reply cannot be delivered
    if let Err(e) = state.chat.post_text(&message.channel, &reply).await {
        error!("Failed to post reply to {}: {}", message.channel, e);
    }

    Ok(())
}
