use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use stocklens_analytics::{AnalyticsConfig, AnalyticsService};
use stocklens_api::app::{build_app, services::AppServices};
use stocklens_api::shutdown::shutdown_signal;
use stocklens_auth::{AuthService, TokenStore};
use stocklens_infra::{seed_token_store, Config, JsonDumpDataset};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    stocklens_observability::init();
    if let Err(err) = dotenv {
        warn!(error = %err, "no .env file loaded; using process environment");
    }

    let config = Config::from_env().context("invalid configuration")?;
    if config.auth_secret_key == stocklens_infra::config::DEFAULT_SECRET {
        warn!("AUTH_SECRET_KEY not set; using insecure dev default");
    }

    let tokens = Arc::new(TokenStore::new());
    seed_token_store(&tokens, &config.token_file);

    let services = AppServices::new(
        AnalyticsService::new(AnalyticsConfig::default().with_workers(config.workers)),
        AuthService::new(config.auth_secret_key.clone(), tokens),
        Arc::new(JsonDumpDataset::new(
            config.stock_dump_path.clone(),
            config.sales_dump_path.clone(),
        )),
    );
    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    info!(
        addr = %listener.local_addr()?,
        workers = config.workers,
        "analytics service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}
