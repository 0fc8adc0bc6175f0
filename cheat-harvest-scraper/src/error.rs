/// Errors that can occur while collecting catalog and cheat data.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Unexpected page structure: {0}")]
    Parse(String),

    #[error("No match for {0}")]
    NoMatch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScrapeError {
    pub(crate) fn fetch(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }

    /// Transport failure or non-success status. Always recoverable by
    /// skipping the title or build that was being fetched.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Status { .. })
    }
}
