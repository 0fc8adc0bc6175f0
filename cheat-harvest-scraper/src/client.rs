use reqwest::blocking::{Client, Response};

use crate::catalog::Catalog;
use crate::error::ScrapeError;

const CATALOG_URL: &str = "https://tinfoil.media/Title/ApiJson/";
const TITLE_PAGE_URL: &str = "https://tinfoil.io/Title/";
const CHEAT_API_URL: &str = "https://www.cheatslips.com/api/v1/cheats";
const USER_AGENT: &str = concat!("cheat-harvest/", env!("CARGO_PKG_VERSION"));

/// Base URLs for every origin the pipeline talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// JSON catalog of every title
    pub catalog: String,
    /// Detail page prefix; the title id is appended
    pub title_page: String,
    /// Cheat API prefix; `/{title_id}/{build_id}` is appended
    pub cheat_api: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            catalog: CATALOG_URL.to_string(),
            title_page: TITLE_PAGE_URL.to_string(),
            cheat_api: CHEAT_API_URL.to_string(),
        }
    }
}

impl Endpoints {
    pub fn title_page_url(&self, title_id: &str) -> String {
        format!("{}{}", self.title_page, title_id)
    }

    pub fn cheat_api_url(&self, title_id: &str, build_id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.cheat_api.trim_end_matches('/'),
            title_id,
            build_id
        )
    }
}

/// Blocking HTTP client shared by every source.
///
/// Requests are issued one at a time; there is no retry and no rate
/// limiting here. Pacing between titles is the driver's job.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
    endpoints: Endpoints,
}

impl HttpClient {
    pub fn new(endpoints: Endpoints) -> Result<Self, ScrapeError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ScrapeError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Send a GET request without interpreting the status code.
    pub(crate) fn send(&self, url: &str, headers: &[(&str, &str)]) -> Result<Response, ScrapeError> {
        let mut req = self.http.get(url);
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        req.send().map_err(|e| ScrapeError::fetch(url, e))
    }

    /// GET a URL and return its body, failing on any non-success status.
    pub(crate) fn get_text(&self, url: &str) -> Result<String, ScrapeError> {
        let resp = self.send(url, &[])?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        resp.text().map_err(|e| ScrapeError::fetch(url, e))
    }

    /// Download and parse the full title catalog.
    pub fn fetch_catalog(&self) -> Result<Catalog, ScrapeError> {
        log::debug!("Fetching catalog from {}", self.endpoints.catalog);
        let body = self.get_text(&self.endpoints.catalog)?;
        Catalog::from_json(&body)
    }
}
