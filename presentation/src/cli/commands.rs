//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Turn-based multi-persona discussion server")]
#[command(long_about = r#"
Roundtable serves a group conversation between a fixed roster of agent
personas and a human participant.

Surfaces:
  POST /chat      one message in, one round of replies out, full history back
  GET  /ws-chat   long-lived WebSocket session with streamed turn events
  GET  /history   the accumulated discussion so far

Configuration files are loaded from (in priority order):
  1. --config <path>                        Explicit config file
  2. ./roundtable.toml                      Project-level config
  3. ~/.config/roundtable/config.toml       Global config

Example:
  roundtable
  roundtable --port 9000 -vv
  roundtable --config ./demo.toml
"#)]
pub struct Cli {
    /// Path to a config file (highest priority)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ignore config files and use built-in defaults
    #[arg(long)]
    pub no_config: bool,

    /// Bind host (overrides config)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Bind port (overrides config)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
