//! Main entry point for the Automation Gateway

use automation_gateway::{api, config::Settings, AppState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Local development convenience; platforms inject the real environment
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // Load configuration
    let settings = Settings::load()?;
    settings.validate()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    if settings.logging.format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    }

    info!(dotenv = dotenv_loaded, "Starting Automation Gateway");
    for warning in &settings.warnings {
        warn!("{}", warning);
    }

    let capabilities = settings.capabilities();
    info!(
        environment = %settings.environment,
        automation_level = %settings.automation.level,
        openai = capabilities.openai,
        apollo = capabilities.apollo,
        calendly = capabilities.calendly,
        linkedin = capabilities.linkedin,
        stripe = capabilities.stripe,
        "Loaded configuration"
    );
    if !capabilities.openai {
        warn!("OPENAI_API_KEY not set, status will report configuration_needed");
    }

    let addr = settings.bind_address();

    // Create application state
    let app_state = Arc::new(AppState::new(settings));

    // Build the router
    let app = api::routes::create_router(app_state.clone()).await?;

    info!("Server listening on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let stats = app_state.telemetry.snapshot();
    info!(
        requests = stats.requests_total,
        jobs_dispatched = stats.jobs_dispatched,
        jobs_completed = stats.jobs_completed,
        "Automation Gateway shut down"
    );

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
