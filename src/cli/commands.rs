use clap::{Args, Parser, Subcommand};

/// Embedded by build.rs; shown by `bountydash --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

#[derive(Parser)]
#[command(
    name = "bountydash",
    version,
    long_version = LONG_VERSION,
    about = "Read-side dashboard API over a security-findings store"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the dashboard HTTP API server
    Serve(ServeArgs),
    /// Provision the record collections and indexes, then exit
    Init(InitArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Listen port
    #[arg(short, long, default_value_t = 3000, env = "PORT")]
    pub port: u16,

    /// Path to the findings database
    #[arg(long, default_value = "./data/bountydash.db", env = "BOUNTYDASH_DB")]
    pub db: String,
}

#[derive(Args, Clone)]
pub struct InitArgs {
    /// Path to the findings database
    #[arg(long, default_value = "./data/bountydash.db", env = "BOUNTYDASH_DB")]
    pub db: String,
}
