use std::path::{Path, PathBuf};

use crate::error::ScrapeError;

/// Environment variable holding the cheat API token.
pub const TOKEN_ENV: &str = "CHEATSLIPS_API_TOKEN";

/// Where the API token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Given on the command line.
    Argument,
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Typed in at the prompt.
    Prompt,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Argument => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Prompt => write!(f, "prompt"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    cheatslips: Option<CheatSlipsConfig>,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct CheatSlipsConfig {
    api_token: Option<String>,
}

/// Return the path to the credentials config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cheat-harvest").join("credentials.toml"))
}

/// Look up a stored token. Priority: env var > config file.
///
/// Blank values count as unset.
pub fn load_token() -> Option<(String, CredentialSource)> {
    if let Some(token) = non_blank(std::env::var(TOKEN_ENV).ok()) {
        return Some((token, CredentialSource::EnvVar(TOKEN_ENV)));
    }
    let path = config_path()?;
    read_token(&path).map(|t| (t, CredentialSource::ConfigFile))
}

/// Where a stored token would be loaded from, without loading it.
pub fn credential_source() -> CredentialSource {
    load_token()
        .map(|(_, source)| source)
        .unwrap_or(CredentialSource::Missing)
}

/// Save the token to the config file, creating parent directories as needed.
///
/// Returns the path the file was written to.
pub fn save_to_file(token: &str) -> Result<PathBuf, ScrapeError> {
    let path = config_path().ok_or_else(|| {
        ScrapeError::Config("Could not determine config directory".to_string())
    })?;
    write_token(&path, token)?;
    Ok(path)
}

fn read_token(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let config: ConfigFile = match toml::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Ignoring unreadable config {}: {}", path.display(), e);
            return None;
        }
    };
    non_blank(config.cheatslips?.api_token)
}

fn write_token(path: &Path, token: &str) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let config = ConfigFile {
        cheatslips: Some(CheatSlipsConfig {
            api_token: non_blank(Some(token.to_string())),
        }),
    };
    let toml_str = toml::to_string_pretty(&config)
        .map_err(|e| ScrapeError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, toml_str)?;
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
