//! Logger setup: plain messages on stdout, optionally mirrored to a file.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::LevelFilter;

use crate::CliError;

/// Crates whose debug output `--verbose` turns on. Dependencies stay at info.
const OWN_CRATES: &[&str] = &[
    "cheat_harvest",
    "cheat_harvest_core",
    "cheat_harvest_scraper",
    "cheat_harvest_frontend",
];

/// Install the global logger.
///
/// Normal runs print bare messages at info level. `--quiet` keeps warnings
/// and errors only; `--verbose` adds timestamps, level tags and debug
/// output. `RUST_LOG` is applied on top of either.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let mirror = match logfile {
        Some(path) => Some(Mutex::new(File::create(path)?)),
        None => None,
    };

    let mut builder = env_logger::Builder::new();
    builder.target(env_logger::Target::Stdout);
    builder.filter_level(base_level(quiet));
    if verbose && !quiet {
        for krate in OWN_CRATES {
            builder.filter_module(krate, LevelFilter::Debug);
        }
    }
    builder.parse_default_env();

    builder.format(move |buf, record| {
        let line = if verbose {
            format!(
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        } else {
            record.args().to_string()
        };

        if let Some(file) = &mirror {
            if let Ok(mut f) = file.lock() {
                let plain = strip_ansi_escapes::strip(line.as_bytes());
                let _ = f.write_all(&plain);
                let _ = f.write_all(b"\n");
            }
        }
        writeln!(buf, "{line}")
    });

    builder
        .try_init()
        .map_err(|e| CliError::other(format!("Logger already initialized: {e}")))
}

fn base_level(quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}
