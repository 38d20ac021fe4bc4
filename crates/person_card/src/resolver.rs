//! Resolver - validator, lookup, fallback
//!
//! Lookup failures are recovered here and never reach the caller.

use crate::card::{CardEnvelope, FallbackPolicy, PersonCard};
use crate::lookup::{LookupError, LookupFailure, PersonLookup};
use crate::validator::{check_name, NameCheck, RejectReason};
use tracing::{info, warn};

/// Outcome of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Real data from the lookup collaborator
    Found(PersonCard),
    /// Lookup yielded nothing; card synthesized from the query
    Fallback { card: PersonCard, cause: LookupError },
    /// Query is not a full name; no lookup attempted
    Rejected(RejectReason),
}

impl Resolution {
    pub fn card(&self) -> Option<&PersonCard> {
        match self {
            Resolution::Found(card) | Resolution::Fallback { card, .. } => Some(card),
            Resolution::Rejected(_) => None,
        }
    }

    pub fn into_envelope(self) -> Option<CardEnvelope> {
        match self {
            Resolution::Found(card) | Resolution::Fallback { card, .. } => Some(card.into()),
            Resolution::Rejected(_) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolution::Fallback { .. })
    }
}

/// Resolve a query to a person card
pub fn resolve(query: &str, lookup: &dyn PersonLookup, policy: &FallbackPolicy) -> Resolution {
    if let NameCheck::Rejected(reason) = check_name(query) {
        return Resolution::Rejected(reason);
    }

    match lookup.find_person(query) {
        Ok(card) => Resolution::Found(card),
        Err(cause) => {
            let failure = cause.failure();
            match failure {
                LookupFailure::EmptyPayload => {
                    info!(query, failure = failure.as_str(), "No person data, using fallback card")
                }
                _ => warn!(
                    query,
                    failure = failure.as_str(),
                    error = %cause,
                    "Person lookup failed, using fallback card"
                ),
            }

            Resolution::Fallback {
                card: policy.build(query),
                cause,
            }
        }
    }
}
