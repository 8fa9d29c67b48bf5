use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use recipe_box::config::Config;
use recipe_box::{Server, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = Arc::new(config.store());
    tracing::info!(recipes = store.len(), "recipe store ready");

    Server::bind(config.addr)
        .body_limit(config.body_limit)
        .serve(app(store))
        .await
        .context("server error")
}
