//! Writing harvested cheats to disk and packaging each build.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use cheat_harvest_core::{Build, Cheat, HarvestedTitle, Title, folder_name_or};

use crate::FrontendError;
use crate::archive::zip_directory;
use crate::layout::OutputLayout;

/// What happened while persisting one build or title.
#[derive(Debug, Default)]
pub struct PersistOutcome {
    /// Cheat files written
    pub written: usize,
    /// Archives written
    pub archives: usize,
    /// One line per file or archive that could not be written
    pub warnings: Vec<String>,
}

impl PersistOutcome {
    fn merge(&mut self, other: PersistOutcome) {
        self.written += other.written;
        self.archives += other.archives;
        self.warnings.extend(other.warnings);
    }
}

/// Text stored in a cheat file: the bracketed name, then one code per line.
pub fn cheat_file_contents(cheat: &Cheat) -> String {
    let mut text = format!("[{}]\n", cheat.name);
    text.push_str(&cheat.codes.join("\n"));
    text
}

/// Read a cheat file back into its name and code lines.
pub fn read_cheat_file(path: &Path) -> Result<(String, Vec<String>), FrontendError> {
    let text = fs::read_to_string(path)?;
    let mut lines = text.lines();
    let name = lines
        .next()
        .and_then(|l| l.strip_prefix('['))
        .and_then(|l| l.strip_suffix(']'))
        .ok_or_else(|| FrontendError::InvalidCheatFile {
            path: path.to_path_buf(),
            reason: "first line is not a bracketed name".to_string(),
        })?;
    let codes = lines.map(str::to_string).collect();
    Ok((name.to_string(), codes))
}

/// Folder names for each cheat of a build, unique within the build.
///
/// Names that sanitize to nothing become `cheat-N` (1-based position).
/// Collisions, compared case-insensitively, get ` (2)`, ` (3)`, ...
pub fn cheat_folders(cheats: &[Cheat]) -> Vec<String> {
    let mut used = HashSet::new();
    cheats
        .iter()
        .enumerate()
        .map(|(i, cheat)| {
            let base = folder_name_or(&cheat.name, &format!("cheat-{}", i + 1));
            let mut candidate = base.clone();
            let mut n = 2;
            while !used.insert(candidate.to_lowercase()) {
                candidate = format!("{base} ({n})");
                n += 1;
            }
            candidate
        })
        .collect()
}

/// Write every cheat of `build` and archive the build directory.
///
/// A cheat file that cannot be written is logged and skipped. A failed
/// archive leaves `archive_path` unset. Whatever an earlier run left in
/// the build directory is removed first, so the archive holds exactly this
/// build's cheats. Only failing to reset the build directory is an error.
pub fn persist_build(
    layout: &OutputLayout,
    title: &Title,
    build: &mut Build,
) -> Result<PersistOutcome, FrontendError> {
    let mut outcome = PersistOutcome::default();
    if !build.has_cheats() {
        return Ok(outcome);
    }

    let build_dir = layout.build_dir(title, &build.build_id);
    clear_dir(&build_dir)?;
    fs::create_dir_all(&build_dir).map_err(|e| FrontendError::write(&build_dir, e))?;
    log::debug!("Build directory {}", build_dir.display());

    for (cheat, folder) in build.cheats.iter().zip(cheat_folders(&build.cheats)) {
        let path = layout.cheat_file(title, &build.build_id, &folder);
        match write_cheat(&path, cheat) {
            Ok(()) => {
                log::debug!("Wrote {}", path.display());
                outcome.written += 1;
            }
            Err(e) => {
                log::error!("{e}");
                outcome.warnings.push(e.to_string());
            }
        }
    }
    build.cheat_dir = Some(build_dir.clone());

    let archive = layout.archive_path(title, &build.build_id);
    match zip_directory(&build_dir, &archive) {
        Ok(count) => {
            log::debug!("Archived {count} file(s) to {}", archive.display());
            build.archive_path = Some(archive);
            outcome.archives += 1;
        }
        Err(e) => {
            log::error!("Failed to archive {}: {e}", build_dir.display());
            outcome.warnings.push(format!("archive {}: {e}", archive.display()));
        }
    }

    Ok(outcome)
}

/// Persist every build of a title, continuing past builds that fail.
pub fn persist_title(layout: &OutputLayout, harvested: &mut HarvestedTitle) -> PersistOutcome {
    let mut outcome = PersistOutcome::default();
    for build in &mut harvested.builds {
        match persist_build(layout, &harvested.title, build) {
            Ok(o) => outcome.merge(o),
            Err(e) => {
                log::error!("Skipping build {}: {e}", build.build_id);
                outcome.warnings.push(e.to_string());
            }
        }
    }
    outcome
}

fn clear_dir(dir: &Path) -> Result<(), FrontendError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            log::debug!("Cleared previous contents of {}", dir.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FrontendError::write(dir, e)),
    }
}

fn write_cheat(path: &Path, cheat: &Cheat) -> Result<(), FrontendError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| FrontendError::write(parent, e))?;
    }
    fs::write(path, cheat_file_contents(cheat)).map_err(|e| FrontendError::write(path, e))
}

#[cfg(test)]
#[path = "tests/persist_tests.rs"]
mod tests;
