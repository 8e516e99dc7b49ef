// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "noise-orb")]
#[command(about = "Scroll-driven noise-displaced orb", long_about = None)]
pub struct Cli {
    /// Disable UI overlay and console output
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Path to a JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the mesh subdivision depth
    #[arg(long)]
    pub subdivisions: Option<u32>,
}
