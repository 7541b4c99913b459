//! Slack image bot - Entry point.

use image_registry::{ImageStore, SqliteImageStore};
use secrecy::ExposeSecret;
use slack_bot::{
    api::{create_router, AppState},
    config::Config,
    signature::SignatureVerifier,
};
use slack_client::SlackClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Slack image bot");

    // Open the image registry; its calls give up before the request deadline
    let images = match SqliteImageStore::open(&config.registry.path) {
        Ok(store) => store.with_busy_timeout(config.server.request_timeout / 2),
        Err(e) => {
            error!(
                "Failed to open image registry at {}: {}",
                config.registry.path.display(),
                e
            );
            std::process::exit(1);
        }
    };

    match images.count().await {
        Ok(count) => info!("Image registry holds {} images", count),
        Err(e) => warn!("Could not count images: {}", e),
    }

    // Initialize Slack client
    let slack = match SlackClient::new(
        config.slack.bot_token.expose_secret().as_str(),
        config.slack.api_url.as_str(),
    ) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create Slack client: {}", e);
            std::process::exit(1);
        }
    };

    match slack.auth_test().await {
        Ok(auth) => info!(
            team = ?auth.team,
            user = ?auth.user,
            "Authenticated with Slack"
        ),
        Err(e) => warn!("Slack auth.test failed: {}", e),
    }

    let verifier = SignatureVerifier::new(
        config.slack.signing_secret.expose_secret().as_str(),
        config.slack.max_request_age,
    );
    if config.slack.max_request_age.is_zero() {
        warn!("Request timestamp window disabled");
    }

    // Create application state
    let state = AppState::new(
        verifier,
        Arc::new(images),
        Arc::new(slack),
        config.server.request_timeout,
    );

    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::new(
        config
            .server
            .listen_addr
            .parse()
            .unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Shutdown complete");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
