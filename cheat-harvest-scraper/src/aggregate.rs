//! Joining the detail page and the cheat API into per-build cheat lists.
//!
//! Primary-site cheats carry a patch version and attach to the build whose
//! version label is exactly equal. Secondary cheats are keyed by build id
//! and are appended as-is, so a cheat offered by both origins appears twice.

use std::collections::HashMap;

use cheat_harvest_core::{Build, BuildId, Cheat, CheatSource};

use crate::cheatslips::SecondarySource;
use crate::error::ScrapeError;
use crate::page::{CheatRow, DetailSource};
use crate::resolve::WorkItem;

/// Produce the builds of one title that ended up with at least one cheat.
///
/// Only the detail-page fetch can fail. Missing sections, unjoinable cheat
/// rows and failed secondary lookups are logged and treated as "nothing
/// found" for the smallest affected unit.
pub fn aggregate_title(
    detail: &dyn DetailSource,
    secondary: Option<&dyn SecondarySource>,
    item: &WorkItem,
) -> Result<Vec<Build>, ScrapeError> {
    let title = &item.title;
    let page = detail.fetch_detail(&title.id)?;

    let Some(rows) = page.builds else {
        log::warn!("No build table found for {} ({})", title.display_name, title.id);
        return Ok(Vec::new());
    };

    let mut builds: Vec<Build> = rows
        .into_iter()
        .filter(|row| !row.build_id.trim().is_empty())
        .map(|row| {
            log::debug!("Build {} (version {})", row.build_id, row.version);
            Build::new(BuildId::new(&row.build_id), row.version)
        })
        .collect();

    let all_versions: Vec<String> = builds.iter().map(|b| b.version_label.clone()).collect();
    if !item.restrict_to.is_empty() {
        builds.retain(|b| item.restrict_to.iter().any(|r| r.matches(&b.build_id)));
        for wanted in &item.restrict_to {
            if !builds.iter().any(|b| b.build_id.matches(wanted)) {
                log::warn!("Build {wanted} not listed for {}", title.display_name);
            }
        }
    }
    if builds.is_empty() {
        log::warn!("No builds to process for {} ({})", title.display_name, title.id);
        return Ok(Vec::new());
    }

    match page.cheats {
        Some(rows) => attach_primary(&mut builds, rows, &all_versions),
        None => log::info!("No cheat table found for {}", title.display_name),
    }

    if let Some(source) = secondary {
        for build in &mut builds {
            match source.fetch_cheats(&title.id, &build.build_id) {
                Ok(cheats) => {
                    if !cheats.is_empty() {
                        log::info!(
                            "{} cheat(s) from {} for build {}",
                            cheats.len(),
                            CheatSource::SecondaryApi.site_name(),
                            build.build_id
                        );
                    }
                    for cheat in cheats {
                        build.add_cheat(cheat);
                    }
                }
                Err(e) => {
                    log::warn!("Cheat lookup failed for build {}: {e}", build.build_id);
                }
            }
        }
    }

    builds.retain(|b| {
        if !b.has_cheats() {
            log::info!(
                "No cheats for version {} (build {}), skipping",
                b.version_label,
                b.build_id
            );
        }
        b.has_cheats()
    });
    Ok(builds)
}

/// Attach primary-site cheats by exact version label.
///
/// When two builds share a label the later one receives the cheats.
/// Rows for builds excluded by a build filter are dropped quietly.
fn attach_primary(builds: &mut [Build], rows: Vec<CheatRow>, all_versions: &[String]) {
    let mut by_version: HashMap<String, usize> = HashMap::new();
    for (index, build) in builds.iter().enumerate() {
        if let Some(prev) = by_version.insert(build.version_label.clone(), index) {
            log::warn!(
                "Builds {} and {} share version {}; cheats go to {}",
                builds[prev].build_id,
                build.build_id,
                build.version_label,
                build.build_id
            );
        }
    }

    for row in rows {
        match by_version.get(&row.patch_version) {
            Some(&index) => {
                log::debug!("Cheat {} (patch {})", row.name, row.patch_version);
                let mut cheat = Cheat::new(row.name, row.codes, CheatSource::PrimarySite);
                cheat.date_added = row.date_added;
                cheat.patch_version = Some(row.patch_version);
                builds[index].add_cheat(cheat);
            }
            None if all_versions.contains(&row.patch_version) => {
                log::debug!("Skipping {} for filtered version {}", row.name, row.patch_version);
            }
            None => {
                log::warn!(
                    "Dropping cheat {}: no build with version {}",
                    row.name,
                    row.patch_version
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/aggregate_tests.rs"]
mod tests;
