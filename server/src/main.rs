use anyhow::Result;
use clap::Parser;
use pollchart_config::{AppConfig, ConfigValidator};
use std::path::PathBuf;

/// Serves random line chart data on `GET /`
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on, overrides the configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };
    if let Some(port) = args.port {
        config.server.port = port;
    }
    ConfigValidator::validate_server(&config.server)?;

    let settings = config.server;
    let server =
        pollchart_mock_server::bind((settings.bind_address.as_str(), settings.port), settings.clone())
            .await?;
    log::info!("Server running on http://{}", server.local_addr()?);

    server.run().await?;
    Ok(())
}
