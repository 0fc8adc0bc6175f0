use std::fmt;
use std::path::PathBuf;

/// Length of the canonical build identifier.
pub const BUILD_ID_LEN: usize = 16;

/// A catalog entry for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    /// Origin-specific title id (e.g. "0100000000010000")
    pub id: String,
    /// Plain-text display name, markup already stripped
    pub display_name: String,
    pub release_date: Option<String>,
    pub size_bytes: Option<u64>,
    pub publisher: Option<String>,
}

impl Title {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            release_date: None,
            size_bytes: None,
            publisher: None,
        }
    }
}

/// Canonical build identifier, always at most [`BUILD_ID_LEN`] characters.
///
/// The detail page publishes full 32-character build ids; loaders key
/// cheats by the first 16, so every id is truncated on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildId(String);

impl BuildId {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().chars().take(BUILD_ID_LEN).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ASCII case-insensitive comparison, used for user-supplied ids.
    pub fn matches(&self, other: &BuildId) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which origin contributed a cheat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheatSource {
    /// Scraped from the title's detail page.
    PrimarySite,
    /// Returned by the cheat API for a (title, build) pair.
    SecondaryApi,
}

impl CheatSource {
    /// Human-facing name of the origin, shown in reports.
    pub fn site_name(&self) -> &'static str {
        match self {
            Self::PrimarySite => "tinfoil.io",
            Self::SecondaryApi => "cheatslips.com",
        }
    }
}

impl fmt::Display for CheatSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimarySite => write!(f, "primary-site"),
            Self::SecondaryApi => write!(f, "secondary-api"),
        }
    }
}

/// A single named cheat with its raw code lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cheat {
    pub name: String,
    pub codes: Vec<String>,
    pub date_added: Option<String>,
    pub source: CheatSource,
    /// Version string the primary site declared for this cheat.
    /// This is the join key against [`Build::version_label`].
    pub patch_version: Option<String>,
}

impl Cheat {
    pub fn new(name: impl Into<String>, codes: Vec<String>, source: CheatSource) -> Self {
        Self {
            name: name.into(),
            codes,
            date_added: None,
            source,
            patch_version: None,
        }
    }
}

/// One published revision of a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Build {
    pub build_id: BuildId,
    pub version_label: String,
    pub cheats: Vec<Cheat>,
    /// Origins that contributed at least one cheat, in first-contribution order
    pub sources: Vec<CheatSource>,
    /// Set by persistence once cheat files are written
    pub cheat_dir: Option<PathBuf>,
    /// Set by persistence once the archive is written
    pub archive_path: Option<PathBuf>,
}

impl Build {
    pub fn new(build_id: BuildId, version_label: impl Into<String>) -> Self {
        Self {
            build_id,
            version_label: version_label.into(),
            cheats: Vec::new(),
            sources: Vec::new(),
            cheat_dir: None,
            archive_path: None,
        }
    }

    /// Append a cheat and record its origin if this is the first from it.
    pub fn add_cheat(&mut self, cheat: Cheat) {
        if !self.sources.contains(&cheat.source) {
            self.sources.push(cheat.source);
        }
        self.cheats.push(cheat);
    }

    pub fn has_cheats(&self) -> bool {
        !self.cheats.is_empty()
    }

    /// Provenance tags joined for display, e.g. "tinfoil.io, cheatslips.com".
    pub fn source_names(&self) -> String {
        self.sources
            .iter()
            .map(|s| s.site_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A title together with the builds that ended up carrying cheats.
#[derive(Debug, Clone)]
pub struct HarvestedTitle {
    pub title: Title,
    pub builds: Vec<Build>,
}

impl HarvestedTitle {
    pub fn cheat_count(&self) -> usize {
        self.builds.iter().map(|b| b.cheats.len()).sum()
    }
}
