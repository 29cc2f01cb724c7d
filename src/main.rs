//! Newsdesk Backend
//! Mission: Serve the news-publishing API

use anyhow::{Context, Result};
use newsdesk_backend::{
    api::{create_router, AppState},
    auth::{JwtHandler, UserStore},
    models::Config,
    news::PostStore,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let user_store =
        Arc::new(UserStore::new(&config.database_path).context("Failed to open user store")?);
    let post_store =
        Arc::new(PostStore::new(&config.database_path).context("Failed to open post store")?);
    let jwt_handler = Arc::new(JwtHandler::new(config.jwt_secret));

    let state = AppState::new(user_store, post_store, jwt_handler);
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsdesk_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
