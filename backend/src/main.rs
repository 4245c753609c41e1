use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use time_tracker_backend::{
    config::Config,
    db::connection::{create_pool_with_config, PoolConfig},
    routes::app_router,
    services::passport::HttpPassportLookup,
    state::AppState,
};

fn mask_database_url(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) if parsed.password().is_some() => {
            if parsed.set_password(Some("***")).is_err() {
                return "<unparseable>".into();
            }
            parsed.to_string()
        }
        Ok(parsed) => parsed.to_string(),
        Err(_) => "<unparseable>".into(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "time_tracker_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        database_url = %mask_database_url(&config.database_url),
        passport_api_url = %config.passport_api_url,
        server_addr = %config.server_addr,
        db_max_connections = config.db_max_connections,
        request_timeout_secs = config.request_timeout_secs,
        "Loaded configuration from environment/.env"
    );

    let pool = create_pool_with_config(&config.database_url, PoolConfig::from(&config)).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    let passport = Arc::new(HttpPassportLookup::new(
        &config.passport_api_url,
        config.passport_api_timeout(),
    )?);
    let addr = config.server_addr;
    let app = app_router(AppState::new(pool, config, passport));

    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
