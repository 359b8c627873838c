use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("election error: {0}")]
    Election(#[from] ballot_election::ElectionError),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("election state lock poisoned")]
    LockPoisoned,
}

impl NodeError {
    /// The underlying election error, if this is one.
    pub fn as_election(&self) -> Option<&ballot_election::ElectionError> {
        match self {
            Self::Election(e) => Some(e),
            _ => None,
        }
    }
}
