use anyhow::Result;
use beacon_gateway::{DiscordConnector, Session};
use beacon_server::{ApiState, GatewayPresenceService, LookupMetrics, ServiceConfig, serve};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Beacon Discord presence API", long_about = None)]
struct Args {
    /// Socket address to bind (overrides BEACON_BIND_ADDR)
    #[arg(short, long)]
    addr: Option<SocketAddr>,

    /// Connect to the gateway before serving instead of on first request
    #[arg(long)]
    preconnect: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = ServiceConfig::from_env()?;
    if let Some(addr) = args.addr {
        config.bind_addr = addr;
    }
    if args.preconnect {
        config.preconnect = true;
    }

    let session = Arc::new(Session::new(
        DiscordConnector::new(config.gateway.clone()),
        config.gateway.clone(),
    ));

    if config.preconnect {
        info!("Preconnecting to the gateway");
        session.ensure_started().await?;
    }

    let state = ApiState::new(
        Arc::new(GatewayPresenceService::new(Arc::clone(&session))),
        Arc::new(LookupMetrics::new()),
    );

    serve(&config, state).await?;

    // Server lifetime over; release the gateway session exactly once.
    if let Err(e) = session.close().await {
        warn!(error = %e, "Gateway session did not close cleanly");
    } else {
        info!("Gateway session closed");
    }

    Ok(())
}
