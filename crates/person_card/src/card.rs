//! Person Card - the payload shown for a person query
//!
//! A card comes either from a real lookup or from the fallback builder,
//! which only has the raw query to work with.

use serde::{Deserialize, Serialize};

/// Default prefix for the fallback search link
pub const DEFAULT_SEARCH_PREFIX: &str = "https://www.google.com/search?q=";

/// Default description when no real data is available
pub const DEFAULT_FALLBACK_DESCRIPTION: &str = "Press Enter to search info.";

/// Card type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Person,
}

/// Structured payload describing a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonCard {
    #[serde(rename = "type")]
    pub kind: CardKind,
    pub name: String,
    pub description: String,
    pub url: String,
    /// Always serialized, as `null` when absent
    pub image: Option<String>,
}

impl PersonCard {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        Self {
            kind: CardKind::Person,
            name: name.into(),
            description: description.into(),
            url: url.into(),
            image,
        }
    }
}

/// Output envelope: `{"action": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEnvelope {
    pub action: PersonCard,
}

impl From<PersonCard> for CardEnvelope {
    fn from(action: PersonCard) -> Self {
        Self { action }
    }
}

/// How to build a card when no real data exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackPolicy {
    /// Prepended verbatim to the raw query
    #[serde(default = "default_search_prefix")]
    pub search_prefix: String,

    #[serde(default = "default_description")]
    pub description: String,
}

fn default_search_prefix() -> String {
    DEFAULT_SEARCH_PREFIX.to_string()
}

fn default_description() -> String {
    DEFAULT_FALLBACK_DESCRIPTION.to_string()
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            search_prefix: default_search_prefix(),
            description: default_description(),
        }
    }
}

impl FallbackPolicy {
    /// Search link for the query. The query is appended as-is (no encoding),
    /// so the literal text is always a substring of the result.
    pub fn search_url(&self, query: &str) -> String {
        format!("{}{}", self.search_prefix, query)
    }

    /// Build the data-free card for a query
    pub fn build(&self, query: &str) -> PersonCard {
        PersonCard::new(
            title_case(query),
            self.description.clone(),
            self.search_url(query),
            None,
        )
    }
}

/// Word-initial casing: a cased letter following an uncased char is
/// title-cased, every other cased letter is lowercased.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_cased = false;

    for c in s.chars() {
        let is_cased = c.is_lowercase() || c.is_uppercase();

        if !is_cased {
            out.push(c);
        } else if prev_is_cased {
            out.extend(c.to_lowercase());
        } else {
            // Titlecase: first char of the uppercase mapping, rest lowered ("ß" -> "Ss")
            let mut upper = c.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            for rest in upper {
                out.extend(rest.to_lowercase());
            }
        }

        prev_is_cased = is_cased;
    }

    out
}
