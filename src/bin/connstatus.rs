//! Connection status CLI
//!
//! Loads a session fixture and prints the connection status reply as JSON

use anyhow::{Context, Result};
use clap::Parser;
use connection_status::auth::AuthorizationSession;
use connection_status::{connection_status, ConnectionStatusRequest, StatusConfig};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "connstatus")]
#[command(about = "Report authenticated users, roles and consolidated privileges")]
struct Args {
    /// Path to the session fixture (TOML)
    #[arg(short = 's', long)]
    session: PathBuf,

    /// Path to the configuration file (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Include consolidated privileges in the reply
    #[arg(long)]
    show_privileges: bool,

    /// Print compact JSON
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => StatusConfig::load(path)
            .with_context(|| format!("failed to load configuration from {:?}", path))?,
        None => StatusConfig::default(),
    };

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .context("invalid logging filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("Configuration: {:?}", config);

    let session = AuthorizationSession::load(&args.session)
        .with_context(|| format!("failed to load session from {:?}", args.session))?;

    let request =
        ConnectionStatusRequest::new(args.show_privileges || config.report.show_privileges);
    info!(
        "Reporting connection status (showPrivileges={})",
        request.show_privileges
    );

    let reply =
        connection_status(&session, &request).context("failed to build connection status")?;

    let pretty = config.report.pretty && !args.compact;
    println!("{}", reply.to_json(pretty)?);

    Ok(())
}
