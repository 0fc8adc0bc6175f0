//! Narrowing the catalog down to the titles a run should process.

use cheat_harvest_core::{BuildId, Title};

use crate::catalog::Catalog;

/// An explicit `titleId,buildId` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPair {
    pub title_id: String,
    pub build_id: BuildId,
}

/// How the user chose which titles to process. The modes are exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Exact title ids
    TitleIds(Vec<String>),
    /// Free-text, case-insensitive substring queries against display names
    TitleQueries(Vec<String>),
    /// Specific builds of specific titles
    BuildPairs(Vec<BuildPair>),
    /// Every title in the catalog
    All,
}

impl Selection {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Picks among several titles that matched one query.
///
/// Returns indices into `candidates`. An empty result skips the query.
pub trait Chooser {
    fn choose(&mut self, query: &str, candidates: &[&Title]) -> Vec<usize>;
}

/// Non-interactive chooser that takes every candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChooseAll;

impl Chooser for ChooseAll {
    fn choose(&mut self, _query: &str, candidates: &[&Title]) -> Vec<usize> {
        (0..candidates.len()).collect()
    }
}

/// A title to aggregate, optionally limited to certain builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub title: Title,
    /// Empty means every build on the page
    pub restrict_to: Vec<BuildId>,
}

impl WorkItem {
    pub fn new(title: Title) -> Self {
        Self {
            title,
            restrict_to: Vec::new(),
        }
    }
}

/// Outcome of resolving a selection against the catalog.
#[derive(Debug, Default)]
pub struct Resolution {
    pub items: Vec<WorkItem>,
    /// Ids or queries that matched nothing in the catalog
    pub unmatched: Vec<String>,
}

/// Split a comma-separated list, dropping empty entries.
pub fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `"titleid,buildid;titleid,buildid"`.
///
/// Returns the valid pairs and the raw text of every malformed entry.
pub fn parse_build_pairs(raw: &str) -> (Vec<BuildPair>, Vec<String>) {
    let mut pairs = Vec::new();
    let mut invalid = Vec::new();

    for entry in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        match entry.split_once(',') {
            Some((title, build)) if !title.trim().is_empty() && !build.trim().is_empty() => {
                pairs.push(BuildPair {
                    title_id: title.trim().to_string(),
                    build_id: BuildId::new(build),
                });
            }
            _ => invalid.push(entry.to_string()),
        }
    }
    (pairs, invalid)
}

/// Resolve a selection to concrete work items, in selection order.
///
/// A title selected more than once is processed once; build pairs naming
/// the same title are merged into a single item.
pub fn resolve(catalog: &Catalog, selection: &Selection, chooser: &mut dyn Chooser) -> Resolution {
    let mut res = Resolution::default();

    match selection {
        Selection::All => {
            res.items = catalog.titles().iter().cloned().map(WorkItem::new).collect();
        }
        Selection::TitleIds(ids) => {
            for id in ids {
                match catalog.by_id(id) {
                    Some(title) => push_item(&mut res.items, title, None),
                    None => {
                        log::error!("No title found with id {id}");
                        res.unmatched.push(id.clone());
                    }
                }
            }
        }
        Selection::BuildPairs(pairs) => {
            for pair in pairs {
                match catalog.by_id(&pair.title_id) {
                    Some(title) => push_item(&mut res.items, title, Some(&pair.build_id)),
                    None => {
                        log::error!("No title found with id {}", pair.title_id);
                        res.unmatched.push(pair.title_id.clone());
                    }
                }
            }
        }
        Selection::TitleQueries(queries) => {
            for query in queries {
                let matches = catalog.search(query);
                match matches.len() {
                    0 => {
                        log::error!("No titles found matching '{query}'");
                        res.unmatched.push(query.clone());
                    }
                    1 => push_item(&mut res.items, matches[0], None),
                    _ => {
                        let picked = chooser.choose(query, &matches);
                        if picked.is_empty() {
                            log::warn!("No titles selected for '{query}', skipping");
                        }
                        for index in picked {
                            if let Some(title) = matches.get(index) {
                                push_item(&mut res.items, title, None);
                            }
                        }
                    }
                }
            }
        }
    }

    res
}

fn push_item(items: &mut Vec<WorkItem>, title: &Title, build: Option<&BuildId>) {
    let existing = items.iter_mut().find(|item| item.title.id == title.id);
    match (existing, build) {
        (Some(item), Some(build)) => {
            if !item.restrict_to.iter().any(|b| b.matches(build)) {
                item.restrict_to.push(build.clone());
            }
        }
        (Some(_), None) => {}
        (None, build) => items.push(WorkItem {
            title: title.clone(),
            restrict_to: build.cloned().into_iter().collect(),
        }),
    }
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;
