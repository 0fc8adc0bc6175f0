//! Where everything lands under the output root.
//!
//! ```text
//! <root>/index.html
//! <root>/<title>/index.html
//! <root>/<title>/<title> - <build>.zip
//! <root>/<title>/<build>/<cheat>/cheats/<build>.txt
//! ```

use std::path::{Path, PathBuf};

use cheat_harvest_core::{BuildId, Title, folder_name_or, sanitize_filename};

pub const INDEX_FILE: &str = "index.html";
const CHEATS_SUBDIR: &str = "cheats";

/// Path policy for one output root. Creates nothing by itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder name for a title, falling back to its id when the display
    /// name has nothing usable.
    pub fn title_folder(title: &Title) -> String {
        folder_name_or(&title.display_name, &title.id)
    }

    pub fn build_folder(build_id: &BuildId) -> String {
        sanitize_filename(build_id.as_str())
    }

    pub fn title_dir(&self, title: &Title) -> PathBuf {
        self.root.join(Self::title_folder(title))
    }

    pub fn build_dir(&self, title: &Title, build_id: &BuildId) -> PathBuf {
        self.title_dir(title).join(Self::build_folder(build_id))
    }

    /// `cheat_folder` must already be sanitized and unique within the build.
    pub fn cheat_file(&self, title: &Title, build_id: &BuildId, cheat_folder: &str) -> PathBuf {
        self.build_dir(title, build_id)
            .join(cheat_folder)
            .join(CHEATS_SUBDIR)
            .join(format!("{}.txt", Self::build_folder(build_id)))
    }

    /// Archive beside the build directory, never inside it.
    pub fn archive_path(&self, title: &Title, build_id: &BuildId) -> PathBuf {
        self.title_dir(title).join(format!(
            "{} - {}.zip",
            Self::title_folder(title),
            Self::build_folder(build_id)
        ))
    }

    pub fn title_index(&self, title: &Title) -> PathBuf {
        self.title_dir(title).join(INDEX_FILE)
    }

    pub fn root_index(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn log_file(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title() -> Title {
        Title::new("0100000000010000", "Super Mario\u{2122} Odyssey")
    }

    #[test]
    fn cheat_file_nests_under_build_and_cheat() {
        let layout = OutputLayout::new("out");
        let build = BuildId::new("ABCDEF0123456789FFFF");
        let path = layout.cheat_file(&title(), &build, "Moon Jump");
        assert_eq!(
            path,
            Path::new("out")
                .join("Super MarioTM Odyssey")
                .join("ABCDEF0123456789")
                .join("Moon Jump")
                .join("cheats")
                .join("ABCDEF0123456789.txt")
        );
    }

    #[test]
    fn archive_sits_beside_build_dir() {
        let layout = OutputLayout::new("out");
        let build = BuildId::new("ABCDEF0123456789");
        let archive = layout.archive_path(&title(), &build);
        let build_dir = layout.build_dir(&title(), &build);

        assert_eq!(archive.parent(), build_dir.parent());
        assert!(!archive.starts_with(&build_dir));
        assert_eq!(
            archive.file_name().and_then(|n| n.to_str()),
            Some("Super MarioTM Odyssey - ABCDEF0123456789.zip")
        );
    }

    #[test]
    fn unusable_title_name_falls_back_to_id() {
        let layout = OutputLayout::new("out");
        let t = Title::new("0100ABCD00000000", "\u{300c}\u{30bc}\u{30eb}\u{30c0}\u{300d}");
        assert_eq!(
            layout.title_dir(&t),
            Path::new("out").join("0100ABCD00000000")
        );
    }

    #[test]
    fn indexes_and_log() {
        let layout = OutputLayout::new("out");
        assert_eq!(layout.root_index(), Path::new("out").join("index.html"));
        assert_eq!(
            layout.title_index(&title()),
            Path::new("out").join("Super MarioTM Odyssey").join("index.html")
        );
        assert_eq!(
            layout.log_file("harvest-log.txt"),
            Path::new("out").join("harvest-log.txt")
        );
    }
}
