//! Name Validator
//!
//! Only full names (two or more whitespace-separated tokens) are looked up.

use tracing::debug;

/// Minimum number of tokens for a full name
pub const MIN_NAME_TOKENS: usize = 2;

/// Why a query was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Fewer than [`MIN_NAME_TOKENS`] tokens
    NotFullName { tokens: usize },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::NotFullName { tokens } => write!(
                f,
                "not a full name ({} word{}, need at least {})",
                tokens,
                if *tokens == 1 { "" } else { "s" },
                MIN_NAME_TOKENS
            ),
        }
    }
}

/// Validator outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCheck {
    Accepted,
    Rejected(RejectReason),
}

impl NameCheck {
    pub fn is_accepted(&self) -> bool {
        matches!(self, NameCheck::Accepted)
    }
}

/// Classify a free-text query
pub fn check_name(query: &str) -> NameCheck {
    let tokens = query.split_whitespace().count();

    if tokens < MIN_NAME_TOKENS {
        debug!(query, tokens, "Rejected query: not a full name");
        return NameCheck::Rejected(RejectReason::NotFullName { tokens });
    }

    NameCheck::Accepted
}
