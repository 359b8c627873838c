//! Per-participant voting record.

use crate::proposal::ProposalId;
use serde::{Deserialize, Serialize};

/// Registration and ballot state of one participant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub is_registered: bool,
    pub has_voted: bool,
    /// Set iff `has_voted`.
    pub voted_proposal_id: Option<ProposalId>,
}

impl Voter {
    /// A freshly whitelisted voter who has not voted.
    pub fn registered() -> Self {
        Self {
            is_registered: true,
            has_voted: false,
            voted_proposal_id: None,
        }
    }

    /// Forget any cast ballot so the voter can vote again.
    pub fn reset_ballot(&mut self) {
        self.has_voted = false;
        self.voted_proposal_id = None;
    }
}
