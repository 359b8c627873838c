use thiserror::Error;

/// Errors raised while constructing or parsing shared types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid identity: {0:?}")]
    InvalidIdentity(String),

    #[error("unknown phase: {0}")]
    UnknownPhase(String),
}
