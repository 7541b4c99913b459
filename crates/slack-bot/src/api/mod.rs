//! HTTP API for the Slack webhook.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use crate::commands::CommandRouter;
use crate::signature::SignatureVerifier;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use image_registry::ImageStore;
use slack_client::ChatClient;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Request signature verifier
    pub verifier: Arc<SignatureVerifier>,
    /// Command router over the image registry
    pub router: Arc<CommandRouter>,
    /// Image registry
    pub images: Arc<dyn ImageStore>,
    /// Outbound Slack client
    pub chat: Arc<dyn ChatClient>,
    /// Deadline for handling one message
    pub request_timeout: Duration,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        verifier: SignatureVerifier,
        images: Arc<dyn ImageStore>,
        chat: Arc<dyn ChatClient>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            verifier: Arc::new(verifier),
            router: Arc::new(CommandRouter::new(images.clone())),
            images,
            chat,
            request_timeout,
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/slack/events", post(handlers::slack_events))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
