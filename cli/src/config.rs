use clap::Parser;
use std::path::PathBuf;

use crate::format::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "ordermatcher")]
#[command(about = "Order matcher - continuous limit order matching with price-time priority")]
pub struct Config {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// First id given to orders entered without `#<id>`
    #[arg(long, default_value_t = 1)]
    pub first_id: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Skip the welcome and goodbye banners
    #[arg(short, long)]
    pub quiet: bool,
}
