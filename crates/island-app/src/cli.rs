use std::path::PathBuf;

use clap::Parser;

/// Island: a notch-sized AI companion driven by assistant events.
#[derive(Parser, Debug)]
#[command(name = "island", version, about)]
pub struct Args {
    /// Camera config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep the camera config in memory only.
    #[arg(long, conflicts_with = "config")]
    pub ephemeral: bool,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Port for the local envelope listener.
    #[arg(short, long, default_value_t = 8765)]
    pub port: u16,

    /// Read newline-delimited envelopes from stdin instead of listening.
    #[arg(long)]
    pub stdin: bool,

    /// Width of the physical notch in points, for compact sizing.
    #[arg(long)]
    pub notch_width: Option<f64>,

    /// Safe-area top inset in points.
    #[arg(long)]
    pub top_inset: Option<f64>,

    /// Pull the body-mode camera back until the whole avatar fits.
    #[arg(long)]
    pub fit_body: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
