use std::sync::Arc;

use chrono::Utc;
use tracing_subscriber::EnvFilter;

use donation_admin::api;
use donation_admin::config::Config;
use donation_admin::error::AppError;
use donation_admin::fixtures;
use donation_admin::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let app_state = AppState::new(config.event_buffer_size, config.delays());
    if config.seed_fixtures {
        fixtures::seed(&app_state.store, Utc::now());
        let counts = app_state.store.counts();
        tracing::info!(
            users = counts.users,
            shopkeepers = counts.shopkeepers,
            requests = counts.requests,
            "fixtures loaded"
        );
    }

    let app = api::rest::router(Arc::new(app_state));

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(
        http_port = config.http_port,
        action_delay_ms = config.action_delay_ms,
        "http server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
