use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::FrontendError;

/// Deflate every file under `dir` into a new archive at `dest`.
///
/// Entry names are relative to `dir`, use `/` separators and are written
/// in sorted order so the same tree always yields the same entry list.
/// Returns the number of files archived.
pub fn zip_directory(dir: &Path, dest: &Path) -> Result<usize, FrontendError> {
    let mut files = Vec::new();
    collect_files(dir, &mut files)?;
    files.sort();

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    let out = File::create(dest).map_err(|e| FrontendError::write(dest, e))?;
    let mut zip = zip::ZipWriter::new(out);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in &files {
        let Some(name) = entry_name(dir, path) else {
            log::warn!("Skipping {} in archive: not valid UTF-8", path.display());
            continue;
        };
        zip.start_file(name, options)?;
        let mut input = File::open(path)?;
        io::copy(&mut input, &mut zip)?;
    }

    zip.finish()?;
    Ok(files.len())
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

fn entry_name(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
    Some(parts?.join("/"))
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn archives_tree_with_relative_sorted_entries() {
        let dir = tempfile::tempdir().unwrap();
        let build = dir.path().join("ABCDEF0123456789");
        for cheat in ["Moon Jump", "Infinite Health"] {
            let cheats = build.join(cheat).join("cheats");
            fs::create_dir_all(&cheats).unwrap();
            fs::write(
                cheats.join("ABCDEF0123456789.txt"),
                format!("[{cheat}]\n04000000 00112233 00000063"),
            )
            .unwrap();
        }

        let dest = dir.path().join("Game - ABCDEF0123456789.zip");
        assert_eq!(zip_directory(&build, &dest).unwrap(), 2);

        let mut archive = zip::ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        let names: Vec<_> = archive.file_names().map(str::to_string).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names.len(), 2);
        assert_eq!(names, sorted);
        assert!(names.contains(&"Moon Jump/cheats/ABCDEF0123456789.txt".to_string()));

        let mut text = String::new();
        archive
            .by_name("Infinite Health/cheats/ABCDEF0123456789.txt")
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "[Infinite Health]\n04000000 00112233 00000063");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = zip_directory(&dir.path().join("nope"), &dir.path().join("x.zip"));
        assert!(result.is_err());
        assert!(!dir.path().join("x.zip").exists());
    }
}
