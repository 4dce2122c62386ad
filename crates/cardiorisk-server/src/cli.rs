use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "cardiorisk-server")]
#[command(author, version, about = "Cardiac-disease risk prediction API", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CARDIORISK_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Model artifact path (overrides the config file)
    #[arg(short, long, env = "CARDIORISK_MODEL")]
    pub model: Option<PathBuf>,

    /// Listen address
    #[arg(short = 'l', long, env = "CARDIORISK_LISTEN")]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "CARDIORISK_PORT")]
    pub port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}
