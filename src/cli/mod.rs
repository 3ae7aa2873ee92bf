pub mod commands;
pub mod context;
pub mod output;

use clap::{Parser, Subcommand};

/// Watch CDN traffic usage across multiple GCore accounts.
#[derive(Parser, Debug)]
#[command(name = "cdnwatch", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the key file and config.toml
    #[arg(long, global = true, env = "CDNWATCH_DIR")]
    pub data_dir: Option<String>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage stored API keys
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },

    /// Show month-to-date traffic for every stored key
    Dashboard {
        /// Print summaries as JSON
        #[arg(long)]
        json: bool,
        /// Skip keys marked inactive
        #[arg(long)]
        active_only: bool,
    },

    /// Show usage details for one account
    Account {
        /// Id of the stored key
        id: String,
        /// Print the detail as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the raw daily traffic series for a date range
    Traffic {
        /// Id of the stored key
        id: String,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum KeysAction {
    /// Store a new API key
    Add {
        /// Display name, e.g. "Production Account"
        name: String,
        /// The GCore API key
        key: String,
        /// Store without testing the key first
        #[arg(long)]
        no_verify: bool,
    },
    /// List stored keys
    List,
    /// Change the name or key of a stored entry
    Edit {
        /// Id of the stored key
        id: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New API key
        #[arg(long)]
        key: Option<String>,
        /// Store without testing the new key first
        #[arg(long)]
        no_verify: bool,
    },
    /// Delete a stored key
    Remove {
        /// Id of the stored key
        id: String,
    },
    /// Switch a key between active and inactive
    Toggle {
        /// Id of the stored key
        id: String,
    },
    /// Check that a key is accepted by the API
    Test {
        /// Id of a stored key, or a raw API key
        target: String,
    },
}
