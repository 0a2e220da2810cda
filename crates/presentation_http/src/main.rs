//! VoxPage HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{
    ChatService, CredentialResolver, Provider, ReadingService, SessionRegistry,
    ports::{InferencePort, NarrationPort, SecretStorePort, VisionPort},
};
use infrastructure::{AppConfig, EnvSecretStore, GeminiInferenceAdapter, NarrationAdapter};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voxpage_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("VoxPage v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        model = %config.inference.default_model,
        "Configuration loaded"
    );

    // Secret store and credential resolver
    let secrets: Arc<dyn SecretStorePort> = Arc::new(EnvSecretStore::new());
    let resolver = Arc::new(CredentialResolver::new(Arc::clone(&secrets)));

    // The generation key is required for chat and extraction; without it
    // those features stay disabled and every call reports the missing
    // configuration instead of attempting a network request.
    match resolver.resolve(Provider::Google, None).await {
        Ok(resolution) if resolution.is_absent() => {
            error!(
                "{} is not configured; chat, extraction and the model catalog are disabled \
                 until it is set",
                Provider::Google.env_var()
            );
        },
        Ok(_) => info!("Generation credential configured"),
        Err(e) => error!("Secret store error while checking credentials: {e}"),
    }

    // Initialize adapters
    let gemini = Arc::new(
        GeminiInferenceAdapter::new(config.inference.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize generation adapter: {e}"))?,
    );
    let inference: Arc<dyn InferencePort> = Arc::clone(&gemini) as Arc<dyn InferencePort>;
    let vision: Arc<dyn VisionPort> = gemini;

    let narration: Arc<dyn NarrationPort> = Arc::new(
        NarrationAdapter::new(config.speech.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize narration adapter: {e}"))?,
    );

    // Initialize services
    let sessions = Arc::new(SessionRegistry::new());
    let chat_service = ChatService::new(inference, Arc::clone(&resolver));
    let reading_service = ReadingService::new(vision, narration, resolver, sessions);

    // Create app state
    let state = AppState {
        chat_service: Arc::new(chat_service),
        reading_service: Arc::new(reading_service),
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = routes::create_router(state);

    // Configure CORS layer
    let cors_layer = if config.server.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    };

    let app = app.layer(TraceLayer::new_for_http()).layer(cors_layer);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
