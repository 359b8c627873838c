//! Proposals and their identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a proposal in the election's proposal sequence.
///
/// Ids are assigned at insertion and are only reassigned by a restart, which
/// compacts the surviving proposals to `0..n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(usize);

impl ProposalId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for ProposalId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// A candidate option with its vote counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Free text submitted by the proposing voter; never empty.
    pub description: String,
    pub vote_count: u64,
}

impl Proposal {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            vote_count: 0,
        }
    }
}
