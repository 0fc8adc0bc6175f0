use std::fs;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rand::Rng;

use cheat_harvest_core::HarvestedTitle;
use cheat_harvest_frontend::{OutputLayout, persist_title, write_index, write_title_page};
use cheat_harvest_scraper::{
    Catalog, CheatSlipsClient, ChooseAll, CredentialSource, Endpoints, HarvestLog, HttpClient,
    LogEntry, SecondarySource, Selection, TinfoilSite, WorkItem, aggregate_title,
    parse_build_pairs, parse_id_list, resolve,
};

use crate::CliError;
use crate::cli_types::{HarvestArgs, SelectionArgs};
use crate::prompt::{self, TerminalChooser};
use crate::spinner;

/// Gap between titles for explicit selections.
const EXPLICIT_DELAY: Duration = Duration::from_millis(100);
/// Gap between titles when walking the whole catalog, in seconds.
const ALL_DELAY_SECS: RangeInclusive<u64> = 10..=30;

/// Everything the per-title loop needs besides the sources.
struct HarvestOptions {
    layout: OutputLayout,
    delay: Option<Duration>,
    whole_catalog: bool,
    open_index: bool,
    write_log: bool,
    quiet: bool,
}

/// Run a harvest: resolve the selection, then aggregate, persist and
/// render each title in turn.
pub(crate) fn run_harvest(args: HarvestArgs, quiet: bool) -> Result<(), CliError> {
    let client = HttpClient::new(Endpoints::default())?;

    let pb = spinner::start("Fetching title catalog...", quiet);
    let catalog = client.fetch_catalog();
    pb.finish_and_clear();
    let catalog = catalog?;
    log::info!(
        "{} Catalog loaded ({} titles)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        catalog.len(),
    );

    let selection = build_selection(&args.selection, &catalog)?;

    let token = resolve_token(args.api_key, !args.no_prompt && prompt::interactive());
    let secondary = match token {
        Some((token, source)) => {
            log::info!("Using cheatslips.com token from {}", source);
            Some(CheatSlipsClient::new(client.clone(), token))
        }
        None => {
            log::info!(
                "{}",
                "No cheatslips.com token; collecting from tinfoil.io only"
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
            None
        }
    };

    let resolution = if prompt::interactive() {
        resolve(&catalog, &selection, &mut TerminalChooser)
    } else {
        resolve(&catalog, &selection, &mut ChooseAll)
    };

    let mut run_log = HarvestLog::new();
    for query in &resolution.unmatched {
        run_log.add(LogEntry::Unmatched {
            query: query.clone(),
        });
    }
    if resolution.items.is_empty() {
        return Err(CliError::selection("no catalog titles matched"));
    }

    let opts = HarvestOptions {
        layout: OutputLayout::new(args.output),
        delay: args.delay,
        whole_catalog: selection.is_all(),
        open_index: !args.no_open,
        write_log: !args.no_log,
        quiet,
    };
    let site = TinfoilSite::new(client);
    let secondary = secondary.as_ref().map(|s| s as &dyn SecondarySource);

    harvest_items(&resolution.items, &site, secondary, &opts, &mut run_log)
}

fn harvest_items(
    items: &[WorkItem],
    site: &TinfoilSite,
    secondary: Option<&dyn SecondarySource>,
    opts: &HarvestOptions,
    run_log: &mut HarvestLog,
) -> Result<(), CliError> {
    let total = items.len();
    let mut harvested_titles = Vec::new();

    for (i, item) in items.iter().enumerate() {
        let title = &item.title;
        log::info!(
            "{} {} {}",
            format!("[{}/{}]", i + 1, total).if_supports_color(Stdout, |t| t.dimmed()),
            title.display_name.if_supports_color(Stdout, |t| t.bold()),
            format!("({})", title.id).if_supports_color(Stdout, |t| t.dimmed()),
        );

        match aggregate_title(site, secondary, item) {
            Ok(builds) if builds.is_empty() => {
                log::warn!(
                    "  {} No cheats found for {}",
                    "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                    title.display_name,
                );
                run_log.add(LogEntry::NoCheats {
                    title_id: title.id.clone(),
                    title_name: title.display_name.clone(),
                });
            }
            Ok(builds) => {
                let mut harvested = HarvestedTitle {
                    title: title.clone(),
                    builds,
                };
                run_log.add(store_title(&mut harvested, &opts.layout));
                harvested_titles.push(harvested);
            }
            Err(e) => {
                log::error!(
                    "  {} {}: {}",
                    "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                    title.display_name,
                    e,
                );
                run_log.add(LogEntry::Failed {
                    title_id: title.id.clone(),
                    title_name: title.display_name.clone(),
                    message: e.to_string(),
                });
            }
        }

        if i + 1 < total {
            spinner::wait(title_delay(opts.whole_catalog, opts.delay), opts.quiet);
        }
    }

    log::info!("");
    if harvested_titles.is_empty() {
        log::warn!(
            "{} No cheats found for any selected title",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
    } else if let Some(index) = write_root_index(&harvested_titles, &opts.layout) {
        if opts.open_index {
            if let Err(e) = open::that(&index) {
                log::warn!("Could not open {} in a browser: {}", index.display(), e);
            }
        }
    }

    print_summary(run_log);

    if opts.write_log {
        match write_run_log(run_log, &opts.layout) {
            Ok(path) => log::info!("Log written to {}", path.display()),
            Err(e) => log::warn!("Warning: could not write harvest log: {}", e),
        }
    }
    Ok(())
}

/// Write the index across all harvested titles. A failure is logged and
/// the run carries on to its summary and log file.
fn write_root_index(titles: &[HarvestedTitle], layout: &OutputLayout) -> Option<PathBuf> {
    match write_index(titles, layout) {
        Ok(index) => {
            log::info!(
                "{} Index written to {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                index.display().if_supports_color(Stdout, |t| t.cyan()),
            );
            Some(index)
        }
        Err(e) => {
            log::error!(
                "{} Failed to write index: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            None
        }
    }
}

/// Persist one title's builds and write its page.
fn store_title(harvested: &mut HarvestedTitle, layout: &OutputLayout) -> LogEntry {
    let outcome = persist_title(layout, harvested);
    let mut warnings = outcome.warnings;

    match write_title_page(harvested, layout) {
        Ok(path) => log::debug!("Title page written to {}", path.display()),
        Err(e) => {
            log::error!("  Failed to write title page: {}", e);
            warnings.push(e.to_string());
        }
    }

    let cheats = harvested.cheat_count();
    log::info!(
        "  {} {} cheat(s) across {} build(s)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        cheats,
        harvested.builds.len(),
    );
    if !warnings.is_empty() {
        log::warn!(
            "  {} {} file(s) could not be written",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            warnings.len(),
        );
    }

    LogEntry::Harvested {
        title_id: harvested.title.id.clone(),
        title_name: harvested.title.display_name.clone(),
        builds: harvested.builds.len(),
        cheats,
        warnings,
    }
}

fn print_summary(run_log: &HarvestLog) {
    let summary = run_log.summary();
    let has_issues = summary.failed > 0 || summary.unmatched > 0;

    // Keep the header visible in quiet mode when issues follow it
    if has_issues && log::max_level() < LevelFilter::Info {
        log::warn!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    } else {
        log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    }
    log::info!(
        "  {} {} title(s) harvested ({} builds, {} cheats)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.harvested,
        summary.builds,
        summary.cheats,
    );
    if summary.no_cheats > 0 {
        log::info!("  {} title(s) had no cheats", summary.no_cheats);
    }
    if summary.failed > 0 {
        log::warn!(
            "  {} {} title(s) failed",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            summary.failed,
        );
    }
    if summary.unmatched > 0 {
        log::warn!(
            "  {} {} selection(s) matched no title",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            summary.unmatched,
        );
    }
}

fn write_run_log(run_log: &HarvestLog, layout: &OutputLayout) -> std::io::Result<PathBuf> {
    fs::create_dir_all(layout.root())?;
    let path = layout.log_file(&HarvestLog::default_file_name());
    run_log.write_to_file(&path)?;
    Ok(path)
}

/// Turn the command-line selection into a resolver selection, prompting
/// for a title/build pair when `-b` was given without one.
fn build_selection(args: &SelectionArgs, catalog: &Catalog) -> Result<Selection, CliError> {
    if args.all {
        return Ok(Selection::All);
    }
    if let Some(raw) = &args.game_ids {
        return non_empty(parse_id_list(raw), "no title ids given").map(Selection::TitleIds);
    }
    if let Some(path) = &args.id_file {
        let text = fs::read_to_string(path)
            .map_err(|e| CliError::selection(format!("cannot read {}: {}", path.display(), e)))?;
        let ids = non_empty(ids_from_text(&text), "id file contains no title ids")?;
        return Ok(Selection::TitleIds(ids));
    }
    if let Some(raw) = &args.titles {
        return non_empty(parse_id_list(raw), "no title searches given").map(Selection::TitleQueries);
    }
    if let Some(raw) = &args.build_pairs {
        let raw = match raw {
            Some(raw) => raw.clone(),
            None => prompt_build_pair(catalog)?,
        };
        let (pairs, invalid) = parse_build_pairs(&raw);
        for entry in invalid {
            log::warn!(
                "{} Ignoring '{}': expected titleid,buildid",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                entry,
            );
        }
        return non_empty(pairs, "no valid titleid,buildid pairs").map(Selection::BuildPairs);
    }
    Err(CliError::selection("no titles selected"))
}

fn non_empty<T>(items: Vec<T>, msg: &str) -> Result<Vec<T>, CliError> {
    if items.is_empty() {
        Err(CliError::selection(msg))
    } else {
        Ok(items)
    }
}

/// Title ids from a text file: one per line, blank lines and `#` comments
/// ignored.
fn ids_from_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn prompt_build_pair(catalog: &Catalog) -> Result<String, CliError> {
    if !prompt::interactive() {
        return Err(CliError::selection(
            "--buildid without pairs needs an interactive terminal",
        ));
    }

    let title_id = prompt::read_line("Enter TitleID: ")?;
    let title = catalog
        .by_id(&title_id)
        .ok_or_else(|| CliError::selection(format!("no title found with id '{}'", title_id)))?;
    println!(
        "Title: {}",
        title.display_name.if_supports_color(Stdout, |t| t.bold())
    );

    let build_id = prompt::read_line("Enter BuildID: ")?;
    if build_id.is_empty() {
        return Err(CliError::selection("no build id entered"));
    }
    Ok(format!("{},{}", title.id, build_id))
}

/// Find an API token: `--apikey`, then env/config, then (optionally) a
/// masked prompt. Blank answers leave the secondary source disabled.
fn resolve_token(arg: Option<String>, allow_prompt: bool) -> Option<(String, CredentialSource)> {
    if let Some(token) = arg.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        return Some((token, CredentialSource::Argument));
    }
    if let Some(found) = cheat_harvest_scraper::load_token() {
        return Some(found);
    }
    if !allow_prompt {
        return None;
    }
    match prompt::read_secret("cheatslips.com API token (Enter to skip): ") {
        Ok(token) => token.map(|t| (t, CredentialSource::Prompt)),
        Err(e) => {
            log::warn!("Could not read token: {}", e);
            None
        }
    }
}

/// Pause before the next title. A configured delay always wins.
fn title_delay(whole_catalog: bool, configured: Option<Duration>) -> Duration {
    match configured {
        Some(delay) => delay,
        None if whole_catalog => Duration::from_secs(rand::rng().random_range(ALL_DELAY_SECS)),
        None => EXPLICIT_DELAY,
    }
}
