use thiserror::Error;

use cheat_harvest_frontend::FrontendError;
use cheat_harvest_scraper::ScrapeError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Catalog, page or API failure
    #[error("{0}")]
    Scrape(#[from] ScrapeError),

    /// Output tree or report failure
    #[error("{0}")]
    Frontend(#[from] FrontendError),

    /// Selection that cannot be processed
    #[error("Invalid selection: {0}")]
    Selection(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn selection(msg: impl Into<String>) -> Self {
        Self::Selection(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
