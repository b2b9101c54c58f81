use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Loads organizations and persons from CSV files and lists the people
/// working for one organization.
#[derive(Debug, Clone, Parser)]
#[command(name = "grid_join", version)]
pub struct Config {
    /// Organization file, one `id,name` per line
    #[arg(long, default_value = "data/companies.txt")]
    pub organizations: PathBuf,

    /// Person file, one `id,name,orgId` per line
    #[arg(long, default_value = "data/employees.txt")]
    pub persons: PathBuf,

    /// Organization name to query for
    #[arg(long, default_value = "Microsoft")]
    pub organization: String,

    /// Match organization names case-insensitively
    #[arg(long)]
    pub ignore_case: bool,

    /// Abort loading on the first malformed line
    #[arg(long)]
    pub strict: bool,

    /// Print every input line as it is loaded
    #[arg(long)]
    pub echo: bool,

    /// Write a JSON snapshot of all caches after loading
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Keep running and serve queries over HTTP on this address
    #[arg(long)]
    pub serve: Option<SocketAddr>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
