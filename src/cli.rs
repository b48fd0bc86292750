use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tacticode",
    about = "YouTube tactics-video insight service",
    version,
)]
pub struct Cli {
    /// Address to bind (overrides config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to a config file instead of ~/.config/tacticode/config.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log at debug level by default
    #[arg(short, long)]
    pub verbose: bool,
}
