use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use roster::{Config, Server, UserStore, api};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    let filter = config.env_filter().context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Built once at startup; served from cache afterwards.
    api::docs::openapi_json().context("failed to generate OpenAPI document")?;

    let store = Arc::new(UserStore::new());
    let app = api::router(store);

    let addr = config.addr();
    info!(docs = %format!("http://{addr}/api-docs"), "swagger docs available");

    Server::bind(addr).serve(app).await.context("server error")?;
    Ok(())
}
