//! Leave ledger HTTP server.
//!
//! Usage: `leave-ledger [CONFIG_DIR]`. The directory falls back to
//! `LEAVE_LEDGER_CONFIG`, then `./config`.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leave_ledger::api::{AppState, create_router};
use leave_ledger::config::ConfigLoader;
use leave_ledger::service::LedgerService;
use leave_ledger::store::{FixedSecretAuthorizer, InMemoryStore};

const DEFAULT_CONFIG_DIR: &str = "./config";

fn config_dir() -> String {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("LEAVE_LEDGER_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = config_dir();
    let config = ConfigLoader::load(&dir)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LEAVE_LEDGER_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging().filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_address = config.server().bind_address.clone();
    let authorizer = FixedSecretAuthorizer::new(config.auth().demo_secret.clone());
    let seed = config.into_seed();
    info!(
        config_dir = %dir,
        users = seed.users.len(),
        records = seed.records.len(),
        "Loaded seed ledger"
    );

    let service = LedgerService::new(
        Arc::new(InMemoryStore::seeded(seed)),
        Arc::new(authorizer),
    );
    let router = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .map_err(|e| {
            error!(bind_address = %bind_address, error = %e, "Failed to bind");
            e
        })?;
    info!(bind_address = %bind_address, "Leave ledger listening");

    axum::serve(listener, router).await?;
    Ok(())
}
