//! CLI definitions for deskpilot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use deskpilot_tools_computer::parse_comma_pair;

/// deskpilot CLI.
#[derive(Parser)]
#[command(name = "deskpilot")]
#[command(about = "Drive the mouse, keyboard and screen of one display")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (built-in defaults when missing)
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Perform one action and print the result as JSON
    Invoke {
        /// Action name, e.g. mouse_move, type, screenshot
        #[arg(short, long)]
        action: String,

        /// Text for `key` and `type`
        #[arg(short, long)]
        text: Option<String>,

        /// Target for `mouse_move` and `left_click_drag`, as `x,y`
        #[arg(long, value_parser = parse_coordinate)]
        coordinate: Option<(u32, u32)>,

        /// Also write the screenshot to this PNG file
        #[arg(long)]
        save_image: Option<PathBuf>,
    },

    /// Read JSON requests from stdin, one per line, and answer on stdout
    Serve,

    /// Print the display options advertised to callers
    Options,

    /// List registered tools in Anthropic tool format
    Tools,
}

fn parse_coordinate(s: &str) -> Result<(u32, u32), String> {
    parse_comma_pair(s).ok_or_else(|| format!("expected `x,y` with non-negative integers, got `{}`", s))
}
