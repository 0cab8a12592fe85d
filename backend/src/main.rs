//! Backend entry-point: seeds the shared store and serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::MemoryStore;
use server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        tracing::warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env()?;
    let bind_addr = config.bind_addr();

    // One store instance; every connection handler shares it through the
    // port arcs, which is what makes writes immediately visible everywhere.
    let store = Arc::new(MemoryStore::with_example_thread()?);
    let http_state = HttpState::new(store.clone(), store);

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, http_state, config)?;
    info!(%bind_addr, "question board listening");
    server.await?;
    Ok(())
}
