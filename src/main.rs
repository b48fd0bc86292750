use std::net::SocketAddr;
use std::process::Command;
use std::sync::Arc;

use clap::Parser;
use eyre::Result;
use log::{info, warn};

mod cli;

use cli::Cli;
use tacticode::server::AppState;

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn tool_version(name: &str) -> Option<String> {
    Command::new(name)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| {
            String::from_utf8_lossy(&o.stdout)
                .trim()
                .lines()
                .next()
                .unwrap_or("")
                .to_string()
        })
}

/// Log which external tools are present. Missing tools are not fatal at
/// startup; the endpoints that need them degrade per request.
fn check_tools() {
    let tools = [
        ("yt-dlp", "video download and caption fallback"),
        ("ffmpeg", "frame capture"),
        ("tesseract", "tactic code OCR"),
    ];
    for (tool, purpose) in tools {
        match tool_version(tool) {
            Some(v) => info!("Found {tool}: {v}"),
            None => warn!("{tool} not found, {purpose} will fail until it is installed"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    check_tools();

    let mut config = tacticode::config::Config::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let state = AppState {
        client: reqwest::Client::new(),
        config: Arc::new(config),
    };
    let app = tacticode::server::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
