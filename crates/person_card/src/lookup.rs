//! Lookup capability
//!
//! "Something that, given a name, may return a Person Card." The real
//! implementation is the SearXNG client; tests substitute [`FakePersonLookup`].

use crate::card::PersonCard;
use std::sync::Mutex;

/// Lookup errors
///
/// All of these collapse to the fallback card; they differ only in how
/// they are logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Person search is disabled in configuration")]
    Disabled,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("HTTP {0} from search backend")]
    HttpStatus(u16),

    #[error("Search returned no results")]
    EmptyPayload,

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),
}

/// Coarse failure category for observability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFailure {
    Unavailable,
    Transport,
    EmptyPayload,
    Malformed,
}

impl LookupFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupFailure::Unavailable => "unavailable",
            LookupFailure::Transport => "transport",
            LookupFailure::EmptyPayload => "empty_payload",
            LookupFailure::Malformed => "malformed",
        }
    }
}

impl LookupError {
    pub fn failure(&self) -> LookupFailure {
        match self {
            LookupError::Disabled => LookupFailure::Unavailable,
            LookupError::Transport(_) | LookupError::Timeout(_) | LookupError::HttpStatus(_) => {
                LookupFailure::Transport
            }
            LookupError::EmptyPayload => LookupFailure::EmptyPayload,
            LookupError::MalformedResponse(_) => LookupFailure::Malformed,
        }
    }
}

/// Person lookup collaborator
pub trait PersonLookup: Send + Sync {
    /// Find a person by (already validated) name
    fn find_person(&self, name: &str) -> Result<PersonCard, LookupError>;
}

/// Fake lookup for testing
pub struct FakePersonLookup {
    responses: Mutex<Vec<Result<PersonCard, LookupError>>>,
    queries: Mutex<Vec<String>>,
}

impl FakePersonLookup {
    /// Create a fake with queued responses. The last one repeats.
    pub fn new(responses: Vec<Result<PersonCard, LookupError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn always_found(card: PersonCard) -> Self {
        Self::new(vec![Ok(card)])
    }

    pub fn always_error(error: LookupError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().map(|q| q.len()).unwrap_or(0)
    }

    /// Names passed to `find_person`, in call order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

impl PersonLookup for FakePersonLookup {
    fn find_person(&self, name: &str) -> Result<PersonCard, LookupError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(name.to_string());
        }

        let mut responses = self
            .responses
            .lock()
            .map_err(|_| LookupError::Transport("fake lookup poisoned".to_string()))?;

        match responses.len() {
            0 => Err(LookupError::EmptyPayload),
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }
}
