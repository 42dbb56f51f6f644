use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "tool-classifier")]
#[command(about = "Classify MCP tool descriptors into agent capability categories")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.tool-classifier)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify every tool in a tool list
    Classify {
        /// Tool list JSON (array of {name, description} or MCP tools/list result)
        tools: PathBuf,

        /// Strategy override (explicit, prefix, keyword)
        #[arg(short, long)]
        strategy: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the tools of a single category
    Category {
        /// Tool list JSON
        tools: PathBuf,

        /// Category name (e.g., booking, query, management, uncategorized)
        name: String,

        /// Strategy override (explicit, prefix, keyword)
        #[arg(short, long)]
        strategy: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List categories and their rules
    Categories {
        /// Strategy override (explicit, prefix, keyword)
        #[arg(short, long)]
        strategy: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (strategy, explicit, prefix, keyword)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (strategy)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Create config file with a commented template
    Init,
}
