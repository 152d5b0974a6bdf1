use anyhow::Result;
use clap::Parser;
use pollchart_app::{ChartApp, Dispatch};
use pollchart_config::{AppConfig, ConfigValidator};
use pollchart_renderer::Document;
use pollchart_shared::PointerEvent;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Polls a JSON endpoint and renders it as a line chart page.
///
/// Commands read from stdin: a URL switches the data source, `hover <index>`
/// and `leave` drive the hover label, `quit` exits.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial data URL
    #[arg(short, long)]
    url: Option<String>,

    /// HTML file rewritten after every change
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Exit after the first poll result
    #[arg(long)]
    once: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };
    if let Some(url) = args.url {
        config.poller.source_url = url;
    }
    if let Some(output) = args.output {
        config.surface.output_path = Some(output);
    }
    ConfigValidator::validate(&config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(config, args.once))
}

async fn run(config: AppConfig, once: bool) -> Result<()> {
    let output = config.surface.output_path.clone();
    let mut surface = Document::from_config(&config.surface);
    surface.set_input_value(config.poller.source_url.clone());

    let mut app = ChartApp::with_http(config, surface)?;
    app.update_url_from_input()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            dispatch = app.pump() => {
                let Some(dispatch) = dispatch else { break };
                match &dispatch {
                    Dispatch::Rendered { sequence } => {
                        log::info!("Rendered response #{sequence}");
                    }
                    Dispatch::Cleared { sequence, reason } => {
                        log::warn!("Response #{sequence} cleared the chart: {reason}");
                    }
                    Dispatch::Stale { sequence } => {
                        log::info!("Ignored stale response #{sequence}");
                        continue;
                    }
                    Dispatch::Failed { sequence, error } => {
                        log::error!("Request #{sequence} failed: {error}");
                    }
                }
                write_page(&app, output.as_ref()).await?;
                if once {
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    continue;
                };
                if !handle_command(&mut app, line.trim())? {
                    break;
                }
                write_page(&app, output.as_ref()).await?;
            }
        }
    }

    app.stop();
    Ok(())
}

/// Apply one stdin command. Returns false on `quit`.
fn handle_command(app: &mut ChartApp<Document>, command: &str) -> Result<bool> {
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (None, _) => {}
        (Some("quit"), _) => return Ok(false),
        (Some("leave"), _) => {
            app.pointer(PointerEvent::Leave)?;
        }
        (Some("hover"), Some(index)) => match index.parse() {
            Ok(region) => {
                app.pointer(PointerEvent::Enter { region })?;
            }
            Err(_) => log::warn!("Not a point index: {index}"),
        },
        (Some(url), None) => {
            app.surface_mut().set_input_value(url);
            match app.update_url_from_input() {
                Ok(sequence) => log::info!("Switched to {url} (request #{sequence})"),
                Err(e) => log::warn!("Cannot switch to {url}: {e}"),
            }
        }
        _ => log::warn!("Unknown command: {command}"),
    }
    Ok(true)
}

async fn write_page(app: &ChartApp<Document>, output: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = output {
        tokio::fs::write(path, app.surface().to_html()).await?;
        log::debug!("Wrote {}", path.display());
    }
    Ok(())
}
