//! Resume scoring engine: extractor, keyword profiles, and scorer.

pub mod extractor;
pub mod handlers;
pub mod profile;
pub mod scorer;

use thiserror::Error;

/// Errors the scoring core can produce. Both are deterministic functions of
/// their inputs, so callers can pre-validate to avoid them entirely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// The selected profile has no keywords; the score would be undefined.
    #[error("keyword profile for role '{0}' has no keywords")]
    InvalidProfile(String),

    /// The requested role is not in the registry. Never silently defaulted.
    #[error("no keyword profile configured for role '{0}'")]
    UnknownRole(String),
}
