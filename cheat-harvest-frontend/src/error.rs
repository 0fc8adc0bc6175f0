use std::path::PathBuf;

/// Errors that can occur while writing cheat files, archives and reports.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Malformed cheat file {}: {reason}", path.display())]
    InvalidCheatFile { path: PathBuf, reason: String },
}

impl FrontendError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
