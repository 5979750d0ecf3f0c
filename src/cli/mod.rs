// CLI module for studzo-backend

use clap::Parser;

/// studzo-backend - Gemini-backed AI advisory backend
#[derive(Parser, Debug)]
#[command(name = "studzo-backend", version, about, long_about = None)]
pub struct Args {
    /// Path to a config file (overrides ~/.studzo/config.toml)
    #[arg(long)]
    pub config: Option<String>,
}
