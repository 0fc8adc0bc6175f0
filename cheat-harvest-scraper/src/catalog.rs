//! The title catalog: every known title id and its display name.

use cheat_harvest_core::Title;
use scraper::Html;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ScrapeError;

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    data: Option<Vec<RawEntry>>,
}

/// Catalog entries are loosely typed upstream; accept whatever JSON shape
/// each field arrives in and normalize afterwards.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    release_date: Option<Value>,
    #[serde(default)]
    size: Option<Value>,
    #[serde(default)]
    publisher: Option<Value>,
}

/// All titles returned by the catalog endpoint, in response order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    titles: Vec<Title>,
}

impl Catalog {
    pub fn new(titles: Vec<Title>) -> Self {
        Self { titles }
    }

    /// Parse the catalog JSON document.
    ///
    /// Entries without an id or name are skipped with a warning. A document
    /// without a `data` array is an error.
    pub fn from_json(text: &str) -> Result<Self, ScrapeError> {
        let response: CatalogResponse = serde_json::from_str(text)?;
        let entries = response
            .data
            .ok_or_else(|| ScrapeError::Parse("catalog response has no 'data' key".to_string()))?;

        let mut titles = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let Some(id) = entry.id.as_ref().and_then(value_text) else {
                log::warn!("No 'id' found for catalog entry at index {index}");
                continue;
            };
            let Some(name) = entry.name.as_ref().and_then(value_text) else {
                log::warn!("No 'name' found for title {id}");
                continue;
            };

            titles.push(Title {
                id,
                display_name: plain_text(&name),
                release_date: entry.release_date.as_ref().and_then(value_text),
                size_bytes: entry.size.as_ref().and_then(value_u64),
                publisher: entry
                    .publisher
                    .as_ref()
                    .and_then(value_text)
                    .map(|p| plain_text(&p)),
            });
        }

        log::debug!("Catalog contains {} titles", titles.len());
        Ok(Self { titles })
    }

    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&Title> {
        let id = id.trim();
        self.titles.iter().find(|t| t.id.eq_ignore_ascii_case(id))
    }

    /// Titles whose display name contains `query`, case-insensitively.
    pub fn search(&self, query: &str) -> Vec<&Title> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.titles
            .iter()
            .filter(|t| t.display_name.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Render inline markup (`<b>`, entities, ...) to plain text.
pub fn plain_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "data": [
            {"id": "0100000000010000", "name": "<a href=\"/Title/0100000000010000\">Super Mario Odyssey</a>",
             "release_date": "2017-10-27", "size": 5905580032, "publisher": "Nintendo"},
            {"id": "01007EF00011E000", "name": "The Legend of Zelda: Breath of the Wild &amp; more", "size": "14241104896"},
            {"name": "No id here"},
            {"id": "0100ABCD00000000"}
        ]
    }"#;

    #[test]
    fn parses_entries_and_strips_markup() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);

        let mario = catalog.by_id("0100000000010000").unwrap();
        assert_eq!(mario.display_name, "Super Mario Odyssey");
        assert_eq!(mario.release_date.as_deref(), Some("2017-10-27"));
        assert_eq!(mario.size_bytes, Some(5_905_580_032));
        assert_eq!(mario.publisher.as_deref(), Some("Nintendo"));

        let zelda = catalog.by_id("01007EF00011E000").unwrap();
        assert_eq!(
            zelda.display_name,
            "The Legend of Zelda: Breath of the Wild & more"
        );
        assert_eq!(zelda.size_bytes, Some(14_241_104_896));
        assert!(zelda.publisher.is_none());
    }

    #[test]
    fn missing_data_key_is_an_error() {
        let err = Catalog::from_json(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        let hits = catalog.search("ZELDA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "01007EF00011E000");
        assert!(catalog.search("metroid").is_empty());
        assert!(catalog.search("   ").is_empty());
    }

    #[test]
    fn by_id_ignores_case_and_whitespace() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert!(catalog.by_id(" 01007ef00011e000 ").is_some());
        assert!(catalog.by_id("0100FFFF00000000").is_none());
    }
}
