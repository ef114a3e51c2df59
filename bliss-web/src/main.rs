//! Bliss III Portal Web Server

use anyhow::Context;
use bliss_core::{init_logging, PortalConfig};
use bliss_web::server::BlissServerBuilder;
use bliss_web::WebConfig;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// Bliss III Portal - community administration web server
#[derive(Parser)]
#[command(name = "bliss-web")]
#[command(about = "Web server for the Bliss III community portal")]
#[command(version)]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Server port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable development mode
    #[arg(long)]
    dev: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load environment variables
    dotenvy::dotenv().ok();

    let mut portal = PortalConfig::load(args.config.as_deref())
        .context("Failed to load portal configuration")?;
    if let Some(level) = args.log_level {
        portal.logging.level = level;
    }

    init_logging(&portal.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    // Command line arguments win over file and environment
    let mut builder = BlissServerBuilder::new().config(WebConfig::from_portal(&portal));
    if let Some(host) = args.host {
        builder = builder.host(host);
    }
    if let Some(port) = args.port {
        builder = builder.port(port);
    }
    if args.dev {
        builder = builder.dev_mode(true);
    }

    if portal.assistant.enabled {
        warn!(
            "⚠️  Assistant '{}' is enabled but no provider ships with this build; concierge endpoints answer 503",
            portal.assistant.model
        );
    }

    info!("🏗️  Building server...");
    let server = builder.build().context("Failed to build server")?;

    server.start().await.context("Server failed")?;

    info!("✅ Server shut down gracefully");
    Ok(())
}
