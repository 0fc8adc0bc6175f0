//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cheat-harvest")]
#[command(about = "Collect Switch cheat codes from tinfoil.io and cheatslips.com", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(flatten)]
    pub harvest: HarvestArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Which titles to process. At most one may be given.
#[derive(Args, Debug, Default)]
#[group(id = "selection", multiple = false)]
pub(crate) struct SelectionArgs {
    /// Comma-separated title ids (e.g. 0100000000010000,01007EF00011E000)
    #[arg(short = 'g', long = "gameid", value_name = "IDS")]
    pub game_ids: Option<String>,

    /// File with one title id per line
    #[arg(long, value_name = "PATH")]
    pub id_file: Option<PathBuf>,

    /// Comma-separated title searches; ambiguous matches ask which to use
    #[arg(short = 't', long = "title", value_name = "QUERIES")]
    pub titles: Option<String>,

    /// Semicolon-separated titleid,buildid pairs; prompts when no value is given
    #[arg(short = 'b', long = "buildid", value_name = "PAIRS", num_args = 0..=1)]
    pub build_pairs: Option<Option<String>>,

    /// Process every title in the catalog (slow: waits 10-30s between titles)
    #[arg(short, long)]
    pub all: bool,
}

impl SelectionArgs {
    pub fn is_empty(&self) -> bool {
        self.game_ids.is_none()
            && self.id_file.is_none()
            && self.titles.is_none()
            && self.build_pairs.is_none()
            && !self.all
    }
}

#[derive(Args, Debug)]
pub(crate) struct HarvestArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// cheatslips.com API token (default: $CHEATSLIPS_API_TOKEN, then the config file)
    #[arg(short = 'k', long = "apikey", value_name = "TOKEN")]
    pub api_key: Option<String>,

    /// Never prompt for an API token
    #[arg(long)]
    pub no_prompt: bool,

    /// Output directory
    #[arg(short, long, default_value = "cheat_code")]
    pub output: PathBuf,

    /// Seconds to wait between titles (overrides the default pacing)
    #[arg(long, value_name = "SECS", value_parser = parse_delay)]
    pub delay: Option<Duration>,

    /// Do not open the index page in a browser when done
    #[arg(long)]
    pub no_open: bool,

    /// Disable harvest log file
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Manage the stored cheatslips.com API token
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the token and where it comes from
    Show,

    /// Store a token in the config file
    Setup,

    /// Print the config file path
    Path,
}

fn parse_delay(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|_| format!("'{raw}' is not a valid delay"))
}
