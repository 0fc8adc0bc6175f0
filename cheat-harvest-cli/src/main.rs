//! cheat-harvest CLI
//!
//! Collects Nintendo Switch cheat codes per title and build, writes them as
//! loadable cheat files and zip archives, and renders browsable HTML reports.

mod cli_types;
mod commands;
mod error;
mod logging;
mod prompt;
mod spinner;

use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{} {}", "\u{2718}".if_supports_color(Stdout, |t| t.red()), e);
        std::process::exit(1);
    }

    let result = match cli.command {
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Setup => commands::config::run_config_setup(),
            ConfigAction::Path => commands::config::run_config_path(),
        },
        None if cli.harvest.selection.is_empty() => {
            let _ = Cli::command().print_help();
            std::process::exit(1);
        }
        None => commands::harvest::run_harvest(cli.harvest, cli.quiet),
    };

    if let Err(e) = result {
        log::error!("{} {}", "\u{2718}".if_supports_color(Stdout, |t| t.red()), e);
        std::process::exit(1);
    }
}
