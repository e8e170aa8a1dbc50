mod app;
mod assets;
mod auth;
mod config;
mod db;
mod error;

use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Arc::new(config::AppConfig::from_env()?);

    let default_filter = if config.debug {
        "stockpulse=debug,axum=info,tower_http=debug"
    } else {
        "stockpulse=info,axum=info,tower_http=info"
    };
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = db::AppState::connect(config).await?;

    sqlx::migrate!("./migrations").run(&app_state.db).await?;
    tracing::info!("database migrations applied");

    let app = app::build_app(app_state);
    app::serve(app).await
}
