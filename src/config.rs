use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::store::DEFAULT_DATA_PATH;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Serves class records and per-region latency statistics", long_about = None)]
pub struct Args {
    /// Path to the JSON dataset, relative to the working directory
    #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Address the HTTP server listens on
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long)]
    pub log_json: bool,
}
