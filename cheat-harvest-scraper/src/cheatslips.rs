//! Secondary cheat source: a JSON API keyed by (title id, build id).

use cheat_harvest_core::{BuildId, Cheat, CheatSource};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::client::HttpClient;
use crate::error::ScrapeError;

const TOKEN_HEADER: &str = "X-API-TOKEN";

#[derive(Debug, Deserialize)]
struct CheatsResponse {
    #[serde(default)]
    cheats: Vec<CheatEntry>,
}

#[derive(Debug, Deserialize)]
struct CheatEntry {
    #[serde(default)]
    content: Option<String>,
}

/// Anything that can look up cheats for one build of one title.
///
/// "Nothing known for this build" is `Ok(vec![])`, never an error.
pub trait SecondarySource {
    fn fetch_cheats(&self, title_id: &str, build_id: &BuildId) -> Result<Vec<Cheat>, ScrapeError>;
}

/// Authenticated client for the cheat API.
///
/// Only constructed when a token is configured, so holding one of these
/// is what enables the secondary source.
pub struct CheatSlipsClient {
    client: HttpClient,
    token: String,
}

impl CheatSlipsClient {
    pub fn new(client: HttpClient, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
        }
    }
}

impl SecondarySource for CheatSlipsClient {
    fn fetch_cheats(&self, title_id: &str, build_id: &BuildId) -> Result<Vec<Cheat>, ScrapeError> {
        let url = self
            .client
            .endpoints()
            .cheat_api_url(title_id, build_id.as_str());
        let resp = self.client.send(
            &url,
            &[("accept", "application/json"), (TOKEN_HEADER, self.token.as_str())],
        )?;

        if !has_cheat_body(&url, resp.status())? {
            return Ok(Vec::new());
        }

        let body = resp.text().map_err(|e| ScrapeError::fetch(&url, e))?;
        let response: CheatsResponse = serde_json::from_str(&body)?;
        Ok(cheats_from_response(response))
    }
}

/// Whether a response with `status` carries cheats to parse. Not found is
/// an empty answer; any other non-success status is an error.
fn has_cheat_body(url: &str, status: StatusCode) -> Result<bool, ScrapeError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(false);
    }
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(true)
}

fn cheats_from_response(response: CheatsResponse) -> Vec<Cheat> {
    response
        .cheats
        .into_iter()
        .filter_map(|entry| entry.content)
        .flat_map(|content| parse_cheat_content(&content))
        .map(|(name, codes)| Cheat::new(name, codes, CheatSource::SecondaryApi))
        .collect()
}

/// Split a free-text cheat block into `(name, code lines)` pairs.
///
/// ```text
/// [Weapon Damage]        <- starts a cheat
/// 0x12345678 0x00000001  <- code line for the current cheat
///
/// [-- Section]           <- section header, ignored
/// [Infinite Health]      <- finalizes the previous cheat, starts the next
/// ```
///
/// Blank lines and code lines before the first name are dropped.
pub fn parse_cheat_content(content: &str) -> Vec<(String, Vec<String>)> {
    let mut cheats = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in content.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim();
            if name.starts_with("--") {
                continue;
            }
            if let Some(done) = current.take() {
                cheats.push(done);
            }
            current = Some((name.to_string(), Vec::new()));
        } else if let Some((_, codes)) = current.as_mut() {
            codes.push(line.to_string());
        }
    }
    if let Some(done) = current {
        cheats.push(done);
    }
    cheats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_cheats_and_skips_section_header() {
        let content = "[Weapon Damage]\n0x12345678 0x00000001\n\n[-- Section]\n[Infinite Health]\n0xAABBCCDD 00000001";
        let cheats = parse_cheat_content(content);
        assert_eq!(
            cheats,
            vec![
                (
                    "Weapon Damage".to_string(),
                    vec!["0x12345678 0x00000001".to_string()]
                ),
                (
                    "Infinite Health".to_string(),
                    vec!["0xAABBCCDD 00000001".to_string()]
                ),
            ]
        );
    }

    #[test]
    fn codes_before_first_name_dropped() {
        let cheats = parse_cheat_content("04000000 00000000 00000000\n[Moon Jump]\n580F0000 01234567");
        assert_eq!(cheats.len(), 1);
        assert_eq!(cheats[0].0, "Moon Jump");
        assert_eq!(cheats[0].1, vec!["580F0000 01234567"]);
    }

    #[test]
    fn crlf_and_padding_tolerated() {
        let cheats = parse_cheat_content("  [ 60 FPS ]  \r\n  04000000 0A000000 00000001 \r\n");
        assert_eq!(cheats[0].0, "60 FPS");
        assert_eq!(cheats[0].1, vec!["04000000 0A000000 00000001"]);
    }

    #[test]
    fn name_without_codes_kept() {
        let cheats = parse_cheat_content("[Empty]\n[Full]\n1");
        assert_eq!(cheats.len(), 2);
        assert!(cheats[0].1.is_empty());
    }

    #[test]
    fn empty_content_gives_nothing() {
        assert!(parse_cheat_content("").is_empty());
        assert!(parse_cheat_content("\n\n[-- Only a header]\n").is_empty());
    }

    #[test]
    fn response_entries_flattened_with_secondary_source() {
        let response: CheatsResponse = serde_json::from_str(
            r#"{"cheats": [
                {"id": 1, "content": "[A]\n1111"},
                {"id": 2, "content": null},
                {"id": 3, "content": "[B]\n2222\n[C]\n3333"}
            ]}"#,
        )
        .unwrap();
        let cheats = cheats_from_response(response);
        let names: Vec<_> = cheats.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert!(cheats.iter().all(|c| c.source == CheatSource::SecondaryApi));
        assert!(cheats.iter().all(|c| c.patch_version.is_none()));
    }

    #[test]
    fn not_found_means_no_cheats() {
        assert!(!has_cheat_body("https://x/api/0100/AB", StatusCode::NOT_FOUND).unwrap());
    }

    #[test]
    fn success_has_body() {
        assert!(has_cheat_body("https://x/api/0100/AB", StatusCode::OK).unwrap());
    }

    #[test]
    fn other_failures_are_status_errors() {
        for code in [StatusCode::UNAUTHORIZED, StatusCode::INTERNAL_SERVER_ERROR] {
            let err = has_cheat_body("https://x/api/0100/AB", code).unwrap_err();
            assert!(err.is_fetch());
            match err {
                ScrapeError::Status { url, status } => {
                    assert_eq!(url, "https://x/api/0100/AB");
                    assert_eq!(status, code.as_u16());
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn response_without_cheats_key_is_empty() {
        let response: CheatsResponse = serde_json::from_str(r#"{"titleId": "0100"}"#).unwrap();
        assert!(cheats_from_response(response).is_empty());
    }
}
