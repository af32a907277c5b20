//! Service entry-point: parses the merchant gate, loads settings, and runs
//! the HTTP server.

mod server;

use std::ffi::OsString;

use actix_web::web;
use clap::Parser;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use merchant_events::domain::MerchantId;
use merchant_events::inbound::http::health::HealthState;
use merchant_events::outbound::persistence::{DbPool, PoolConfig};
use merchant_events::settings::AppSettings;
use server::{CatalogConfig, ServerConfig, create_server};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "merchant-events", version, about)]
struct Cli {
    /// Ten-character merchant id sent to the external product catalog.
    #[arg(short = 'H', long = "merchant-id", visible_alias = "merchantID")]
    merchant_id: String,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let merchant_id = MerchantId::new(cli.merchant_id)
        .map_err(|err| std::io::Error::other(format!("--merchant-id: {err}")))?;

    let settings = AppSettings::load_from_iter([OsString::from("merchant-events")])
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let catalog = CatalogConfig::new(
        settings
            .catalog_base_url()
            .map_err(|err| std::io::Error::other(err.to_string()))?,
        merchant_id,
        settings.catalog_timeout(),
    );
    let policy = settings
        .classifier_policy()
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let mut config = ServerConfig::new(bind_addr, catalog)
        .with_reconciler(settings.reconciler_config())
        .with_policy(policy);
    if let Some(url) = settings.database_url() {
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        info!("database pool ready");
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
