use std::sync::Arc;

use anyhow::Context;

use zeroerp_api::{build_app, AppServices, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal outside development.
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    zeroerp_observability::init(&config.observability());

    for warning in config.startup_warnings() {
        tracing::warn!("{warning}");
    }

    let services = Arc::new(AppServices::from_config(&config));
    let app = build_app(&config, services);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        environment = config.environment.as_str(),
        stripe = config.stripe_secret_key.is_some(),
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
