//! Interactive terminal input.

use std::io::{self, BufRead, IsTerminal, Write};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cheat_harvest_core::Title;
use cheat_harvest_scraper::Chooser;

/// True when stdin is a terminal a person can answer from.
pub(crate) fn interactive() -> bool {
    io::stdin().is_terminal()
}

/// Print `prompt` and read one trimmed line from stdin.
pub(crate) fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Read a secret without echoing it. Blank input is `None`.
pub(crate) fn read_secret(prompt: &str) -> io::Result<Option<String>> {
    let value = rpassword::prompt_password(prompt)?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// Asks on the terminal which of several matching titles to process.
pub(crate) struct TerminalChooser;

impl Chooser for TerminalChooser {
    fn choose(&mut self, query: &str, candidates: &[&Title]) -> Vec<usize> {
        println!(
            "Multiple titles match '{}':",
            query.if_supports_color(Stdout, |t| t.bold())
        );
        for (i, title) in candidates.iter().enumerate() {
            println!(
                "  {:>3}. {} {}",
                i + 1,
                title.display_name,
                format!("({})", title.id).if_supports_color(Stdout, |t| t.dimmed())
            );
        }

        loop {
            let input = match read_line("Select numbers (e.g. 1,3), 'a' for all, Enter to skip: ") {
                Ok(input) => input,
                Err(e) => {
                    log::warn!("Could not read selection: {e}");
                    return Vec::new();
                }
            };
            match parse_choice(&input, candidates.len()) {
                Some(picked) => return picked,
                None => println!(
                    "    {}",
                    "Enter numbers from the list, separated by commas."
                        .if_supports_color(Stdout, |t| t.yellow())
                ),
            }
        }
    }
}

/// Parse a selection answer into zero-based indices.
///
/// Accepts a blank answer (nothing), `a`/`all`, or 1-based numbers separated
/// by commas or spaces. `None` means the answer should be asked again.
pub(crate) fn parse_choice(input: &str, count: usize) -> Option<Vec<usize>> {
    let input = input.trim();
    if input.is_empty() {
        return Some(Vec::new());
    }
    if input.eq_ignore_ascii_case("a") || input.eq_ignore_ascii_case("all") {
        return Some((0..count).collect());
    }

    let mut picked = Vec::new();
    for part in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
    {
        let n: usize = part.parse().ok()?;
        if n == 0 || n > count {
            return None;
        }
        if !picked.contains(&(n - 1)) {
            picked.push(n - 1);
        }
    }
    Some(picked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_selects_nothing() {
        assert_eq!(parse_choice("  ", 3), Some(vec![]));
    }

    #[test]
    fn all_selects_everything() {
        assert_eq!(parse_choice("a", 3), Some(vec![0, 1, 2]));
        assert_eq!(parse_choice("ALL", 2), Some(vec![0, 1]));
    }

    #[test]
    fn numbers_are_one_based_and_deduplicated() {
        assert_eq!(parse_choice("3, 1 3", 3), Some(vec![2, 0]));
    }

    #[test]
    fn out_of_range_or_garbage_asks_again() {
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("two", 3), None);
    }
}
