//! Workflow phases of an election.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The phase an election is in.
///
/// The linear path runs from `RegisteringVoters` to `VotesTallied`.
/// `NoConsensusFound` is a side branch entered by a tied tally; a restart leads back
/// to `VotingSessionStarted`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The administrator whitelists voters.
    #[default]
    RegisteringVoters,
    /// Registered voters submit proposals.
    ProposalsRegistrationStarted,
    /// Proposal submission closed; voting not yet open.
    ProposalsRegistrationEnded,
    /// Registered voters cast one vote each.
    VotingSessionStarted,
    /// Voting closed; awaiting tally.
    VotingSessionEnded,
    /// A unique winner was found.
    VotesTallied,
    /// The tally ended in a tie at the maximum.
    NoConsensusFound,
}

impl Phase {
    /// Every phase, in workflow order with the side branch last.
    pub const ALL: [Phase; 7] = [
        Phase::RegisteringVoters,
        Phase::ProposalsRegistrationStarted,
        Phase::ProposalsRegistrationEnded,
        Phase::VotingSessionStarted,
        Phase::VotingSessionEnded,
        Phase::VotesTallied,
        Phase::NoConsensusFound,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::RegisteringVoters => "RegisteringVoters",
            Self::ProposalsRegistrationStarted => "ProposalsRegistrationStarted",
            Self::ProposalsRegistrationEnded => "ProposalsRegistrationEnded",
            Self::VotingSessionStarted => "VotingSessionStarted",
            Self::VotingSessionEnded => "VotingSessionEnded",
            Self::VotesTallied => "VotesTallied",
            Self::NoConsensusFound => "NoConsensusFound",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Phase {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| TypesError::UnknownPhase(s.to_string()))
    }
}
