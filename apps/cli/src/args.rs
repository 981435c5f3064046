//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "panelkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect the settings panel registry and edit preferences")]
pub struct Cli {
    /// Configuration file, layered under `PANELKIT__*` environment variables
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// JSON file keeping stored preferences between runs
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Account id of the acting viewer
    #[arg(long = "as", value_name = "USER_ID", global = true, default_value_t = 1)]
    pub viewer: u64,

    /// Treat the viewer as an administrator
    #[arg(long, global = true)]
    pub admin: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List panels in display order
    Panels {
        /// Include disabled panels and panels without a known group
        #[arg(long)]
        all: bool,
    },
    /// List groups with their displayed panels
    Groups {},
    /// Print the canonical URI of a panel
    Uri {
        key: String,
        /// Target account, defaults to the viewer
        #[arg(long)]
        user: Option<u64>,
        /// Path appended after the panel key
        #[arg(default_value = "")]
        path: String,
    },
    /// Render a panel as JSON
    Show { uri: String },
    /// Submit `key=value` pairs to a panel
    Set {
        uri: String,
        #[arg(value_parser = parse_assignment, required = true, value_name = "KEY=VALUE")]
        values: Vec<(String, String)>,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.trim().is_empty())
        .map(|(key, value)| (key.trim().to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}
