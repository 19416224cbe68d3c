// CLI module for adlens

use clap::Parser;

/// adlens - Multimodal creative analysis service for performance marketing
#[derive(Parser, Debug)]
#[command(name = "adlens", version, about, long_about = None)]
pub struct Args {
    /// Override the configured listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Path to an alternate config file
    #[arg(long, env = "ADLENS_CONFIG")]
    pub config: Option<String>,
}
