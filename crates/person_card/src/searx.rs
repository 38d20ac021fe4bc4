//! SearXNG Client - person lookups against a metasearch instance
//!
//! Issues a single blocking GET per query and maps the first usable hit to
//! a [`PersonCard`]. The response schema is not guaranteed (field names have
//! varied between deployments), so hits are read field by field from raw
//! JSON and anything missing is simply treated as absent.

use crate::card::PersonCard;
use crate::lookup::{LookupError, PersonLookup};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("person-card/", env!("CARGO_PKG_VERSION"));

/// SearXNG configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearxConfig {
    /// When false every lookup returns [`LookupError::Disabled`] without I/O
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// Comma-separated SearXNG categories (e.g. "general")
    #[serde(default = "default_categories")]
    pub categories: Option<String>,

    /// Comma-separated engine names (e.g. "wikipedia")
    #[serde(default)]
    pub engines: Option<String>,

    /// Request timeout; 0 keeps the HTTP client default
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8888/search".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_categories() -> Option<String> {
    Some("general".to_string())
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for SearxConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
            format: default_format(),
            language: default_language(),
            categories: default_categories(),
            engines: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SearxConfig {
    /// Query parameters for a search, in request order
    pub fn query_params(&self, query: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.to_string()),
            ("format", self.format.clone()),
            ("language", self.language.clone()),
        ];

        if let Some(categories) = self.categories.as_deref().filter(|c| !c.is_empty()) {
            params.push(("categories", categories.to_string()));
        }
        if let Some(engines) = self.engines.as_deref().filter(|e| !e.is_empty()) {
            params.push(("engines", engines.to_string()));
        }

        params
    }
}

/// One search result item, all fields optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearxHit {
    pub title: Option<String>,
    pub content: Option<String>,
    pub snippet: Option<String>,
    pub url: Option<String>,
    pub img_src: Option<String>,
    pub thumbnail: Option<String>,
}

impl SearxHit {
    /// Read a hit from raw JSON. Blank or non-string fields count as absent.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            title: field("title"),
            content: field("content"),
            snippet: field("snippet"),
            url: field("url"),
            img_src: field("img_src"),
            thumbnail: field("thumbnail"),
        }
    }

    /// Convert to a card if the hit carries both a title and a link
    pub fn to_card(&self) -> Option<PersonCard> {
        let name = self.title.clone()?;
        let url = self.url.clone()?;
        let description = self
            .content
            .clone()
            .or_else(|| self.snippet.clone())
            .unwrap_or_default();
        let image = self.img_src.clone().or_else(|| self.thumbnail.clone());

        Some(PersonCard::new(name, description, url, image))
    }
}

/// Extract the `results` array from a response body
fn results_of(body: &Value) -> Result<&Vec<Value>, LookupError> {
    body.get("results")
        .and_then(|v| v.as_array())
        .ok_or_else(|| LookupError::MalformedResponse("missing 'results' array".to_string()))
}

/// Map a parsed SearXNG response body to a card
pub fn card_from_response(body: &Value) -> Result<PersonCard, LookupError> {
    let results = results_of(body)?;

    if results.is_empty() {
        return Err(LookupError::EmptyPayload);
    }

    results
        .iter()
        .find_map(|item| SearxHit::from_value(item).to_card())
        .ok_or_else(|| {
            LookupError::MalformedResponse(format!(
                "none of {} results has a title and url",
                results.len()
            ))
        })
}

/// Output of the search debug probe
#[derive(Debug, Clone, Serialize)]
pub struct SearchDiagnostics {
    pub endpoint: String,
    pub params: Vec<(String, String)>,
    pub status: u16,
    pub result_count: usize,
    /// Keys of the first result, sorted
    pub first_keys: Vec<String>,
    pub first_hit: Option<SearxHit>,
    /// Body text for non-success responses
    pub error_body: Option<String>,
}

/// Blocking SearXNG client
pub struct SearxClient {
    config: SearxConfig,
    http: reqwest::blocking::Client,
}

impl SearxClient {
    pub fn new(config: SearxConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(USER_AGENT);
        // 0 keeps the reqwest default
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &SearxConfig {
        &self.config
    }

    fn send(&self, query: &str) -> Result<reqwest::blocking::Response, LookupError> {
        if !self.config.enabled {
            return Err(LookupError::Disabled);
        }

        debug!(endpoint = %self.config.endpoint, query, "Sending search request");

        self.http
            .get(&self.config.endpoint)
            .query(&self.config.query_params(query))
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    LookupError::Timeout(self.config.timeout_secs)
                } else {
                    LookupError::Transport(e.to_string())
                }
            })
    }

    fn read_json(response: reqwest::blocking::Response) -> Result<Value, LookupError> {
        let text = response
            .text()
            .map_err(|e| LookupError::Transport(format!("Failed to read body: {}", e)))?;

        serde_json::from_str(&text)
            .map_err(|e| LookupError::MalformedResponse(format!("body is not JSON: {}", e)))
    }

    /// Debug probe: report what the backend returns for a query
    pub fn diagnose(&self, query: &str) -> Result<SearchDiagnostics, LookupError> {
        let response = self.send(query)?;
        let status = response.status();

        let mut diagnostics = SearchDiagnostics {
            endpoint: self.config.endpoint.clone(),
            params: self
                .config
                .query_params(query)
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            status: status.as_u16(),
            result_count: 0,
            first_keys: Vec::new(),
            first_hit: None,
            error_body: None,
        };

        if !status.is_success() {
            diagnostics.error_body = Some(response.text().unwrap_or_default());
            return Ok(diagnostics);
        }

        let body = Self::read_json(response)?;
        let results = results_of(&body)?;
        diagnostics.result_count = results.len();

        if let Some(first) = results.first() {
            if let Some(object) = first.as_object() {
                let mut keys: Vec<String> = object.keys().cloned().collect();
                keys.sort();
                diagnostics.first_keys = keys;
            }
            diagnostics.first_hit = Some(SearxHit::from_value(first));
        }

        Ok(diagnostics)
    }
}

impl PersonLookup for SearxClient {
    fn find_person(&self, name: &str) -> Result<PersonCard, LookupError> {
        let response = self.send(name)?;
        let status = response.status();

        if !status.is_success() {
            return Err(LookupError::HttpStatus(status.as_u16()));
        }

        let body = Self::read_json(response)?;
        let card = card_from_response(&body)?;
        info!(query = name, name = %card.name, "Person found");

        Ok(card)
    }
}
