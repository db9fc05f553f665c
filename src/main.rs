use std::sync::Arc;
use std::time::Duration;

use bridgejob_backend::{
    config::{get_config, init_config, Config},
    database::pool::{create_pool, run_migrations},
    routes,
    services::telegram_service::TelegramClient,
    AppState,
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    init_config()?;
    let config = Arc::new(get_config().clone());

    let pool = create_pool(&config).await?;
    run_migrations(&pool).await?;

    let app_state = AppState::new(pool, config.clone())?;

    if let Some(webapp_url) = config.webapp_url.as_deref() {
        register_webhook(&config, webapp_url).await;
    } else {
        info!("WEBAPP_URL not set, skipping webhook registration");
    }

    let shutdown = CancellationToken::new();
    let sweeper = tokio::spawn(app_state.expiry.clone().run(
        Duration::from_secs(config.expiry_sweep_interval_secs),
        shutdown.clone(),
    ));

    let app = routes::router(app_state).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.server_address).await?;
    info!("Server listening on {}", config.server_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await?;

    shutdown.cancel();
    if let Err(e) = sweeper.await {
        tracing::warn!(error = %e, "Expiry sweep task ended abnormally");
    }
    info!("Server stopped");
    Ok(())
}

/// `LOG_FORMAT=json` switches to one JSON object per line.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn register_webhook(config: &Config, webapp_url: &str) {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "Could not build HTTP client for webhook registration");
            return;
        }
    };
    let telegram = TelegramClient::new(client, &config.telegram_api_url, &config.telegram_bot_token);
    let target = format!("{}/api/webhook/telegram", webapp_url);

    info!("Checking Telegram webhook status...");
    match telegram.get_webhook_info().await {
        // A configured secret cannot be read back, so re-register when one is set.
        Ok(current) if current.url == target && config.telegram_webhook_secret.is_none() => {
            info!("Telegram webhook is already up to date: {}", current.url);
        }
        Ok(current) => {
            info!("Updating Telegram webhook: {} -> {}", current.url, target);
            match telegram
                .set_webhook(&target, config.telegram_webhook_secret.as_deref())
                .await
            {
                Ok(()) => info!("Telegram webhook registered successfully"),
                Err(e) => tracing::warn!(error = %e, "Failed to register Telegram webhook"),
            }
        }
        Err(e) => tracing::warn!(error = %e, "Could not check Telegram webhook status"),
    }
}

async fn shutdown_signal(shutdown: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        }
        _ = shutdown.cancelled() => {}
    }
    shutdown.cancel();
}
