use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use jobgraph::config::AppConfig;
use jobgraph::http::HttpServer;
use jobgraph::service::GraphService;
use jobgraph::source::{GraphSource, RestSource, StaticSource};

#[derive(Parser)]
#[command(name = "jobgraph", version, about = "Job-connection graph service")]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(long, env = "JOBGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen address (host:port)
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    let (address, port) = match &cli.listen {
        Some(listen) => {
            let (host, port) = listen
                .rsplit_once(':')
                .context("--listen expects host:port")?;
            (host.to_string(), port.parse().context("invalid port")?)
        }
        None => (config.server.address.clone(), config.server.port),
    };

    let source: Box<dyn GraphSource> = match &config.backend.base_url {
        Some(url) => {
            info!("Using REST backend at {}", url);
            Box::new(RestSource::new(url, config.backend.api_key.clone()))
        }
        None => {
            info!("No backend configured; serving the built-in demo dataset");
            Box::new(StaticSource::demo())
        }
    };

    let service = Arc::new(GraphService::new(source));

    // warm the graph so the first request doesn't pay for the load
    if let Err(e) = service.ensure_ready().await {
        warn!("Initial graph load failed: {} (will retry on first request)", e);
    }

    let server = HttpServer::new(service, address, port);
    server.start().await?;
    Ok(())
}
