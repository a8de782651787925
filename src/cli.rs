/// CLI argument parsing and command handling

use clap::{Parser, Subcommand};

// Build timestamp injected at compile time
pub const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");
pub const VERSION_WITH_BUILD: &str = concat!(env!("CARGO_PKG_VERSION"), " (built: ", env!("BUILD_TIMESTAMP"), ")");

// Get version with timestamp
pub fn get_version() -> &'static str {
    VERSION_WITH_BUILD
}

#[derive(Parser)]
#[command(name = "sentinel-cli")]
#[command(author, version = VERSION_WITH_BUILD, about = "Terminal client for the Sentinel endpoint monitoring service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Monitoring server URL (overrides env and config file)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List monitored endpoints
    List,

    /// Register a new endpoint
    Add {
        /// Display name (10-100 characters)
        #[arg(short, long)]
        name: String,

        /// URL to probe
        #[arg(short, long)]
        url: String,

        /// Probe method (GET or POST)
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// HTTP status the probe counts as healthy
        #[arg(short, long, default_value = "200")]
        expected_status: u16,
    },

    /// Trigger a health check and show the response time
    Check {
        /// Endpoint id to check
        id: Option<String>,

        /// Check every listed endpoint
        #[arg(long)]
        all: bool,
    },

    /// Delete an endpoint
    Delete {
        /// Endpoint id to delete
        id: String,
    },

    /// Print the URL of an endpoint's history page
    History {
        /// Endpoint id
        id: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// View configuration
    View,

    /// Show config file path
    Path,

    /// Set and save the monitoring server URL
    SetServer {
        /// Server URL, e.g. http://monitor.internal:8000
        url: String,
    },
}
