use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cheat_harvest_scraper::{CredentialSource, TOKEN_ENV};

use crate::CliError;
use crate::prompt;

fn mask_value(s: &str) -> String {
    if s.chars().count() <= 2 {
        "****".to_string()
    } else {
        let prefix: String = s.chars().take(2).collect();
        format!("{}****", prefix)
    }
}

/// Show the stored token and where it comes from.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = cheat_harvest_scraper::config_path();

    log::info!(
        "{}",
        "cheatslips.com Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    log::info!("");

    let label = "api_token:".if_supports_color(Stdout, |t| t.cyan()).to_string();
    match cheat_harvest_scraper::load_token() {
        Some((token, source)) => {
            log::info!(
                "  {} {} {}",
                label,
                mask_value(&token),
                format!("({})", source).if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  {} {} {}",
                label,
                "not set".if_supports_color(Stdout, |t| t.yellow()),
                format!("(set ${} or run 'cheat-harvest config setup')", TOKEN_ENV)
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
    Ok(())
}

/// Prompt for a token and store it in the config file.
pub(crate) fn run_config_setup() -> Result<(), CliError> {
    println!(
        "{}",
        "cheatslips.com Token Setup".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    let existing = cheat_harvest_scraper::credential_source();
    if existing != CredentialSource::Missing {
        println!(
            "  {}",
            format!("A token is already set ({}); press Enter to keep it.", existing)
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let token = match prompt::read_secret("  api_token: ")? {
        Some(token) => token,
        None if existing != CredentialSource::Missing => {
            println!("  Token unchanged.");
            return Ok(());
        }
        None => return Err(CliError::config("no token entered")),
    };

    let path = cheat_harvest_scraper::save_to_file(&token)?;
    println!();
    println!(
        "{} Token saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    if existing == CredentialSource::EnvVar(TOKEN_ENV) {
        println!(
            "  {}",
            format!("${} still takes precedence over the file.", TOKEN_ENV)
                .if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match cheat_harvest_scraper::config_path() {
        Some(path) => {
            log::info!("{}", path.display());
            Ok(())
        }
        None => Err(CliError::config("could not determine config directory")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_values_are_fully_masked() {
        assert_eq!(mask_value(""), "****");
        assert_eq!(mask_value("ab"), "****");
    }

    #[test]
    fn mask_keeps_two_leading_chars() {
        assert_eq!(mask_value("abcdef123"), "ab****");
        assert_eq!(mask_value("\u{e9}\u{e8}xyz"), "\u{e9}\u{e8}****");
    }
}
