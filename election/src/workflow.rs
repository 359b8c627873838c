//! The election transition table.
//!
//! Every phase change the engine can make is a [`Transition`] with exactly one
//! source and one target phase. Nothing else in the crate compares phases to
//! decide whether a move is legal.

use crate::error::ElectionError;
use ballot_types::Phase;
use std::fmt;

/// A named edge of the workflow graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    StartProposalsRegistration,
    EndProposalsRegistration,
    StartVotingSession,
    EndVotingSession,
    /// Tally with a unique maximum.
    ConcludeTally,
    /// Tally with a tie at the maximum.
    DeclareNoConsensus,
    /// Re-open voting among the tied leaders.
    RestartVotingSession,
}

impl Transition {
    pub const ALL: [Transition; 7] = [
        Transition::StartProposalsRegistration,
        Transition::EndProposalsRegistration,
        Transition::StartVotingSession,
        Transition::EndVotingSession,
        Transition::ConcludeTally,
        Transition::DeclareNoConsensus,
        Transition::RestartVotingSession,
    ];

    /// The only phase this transition may be taken from.
    pub fn source(self) -> Phase {
        match self {
            Self::StartProposalsRegistration => Phase::RegisteringVoters,
            Self::EndProposalsRegistration => Phase::ProposalsRegistrationStarted,
            Self::StartVotingSession => Phase::ProposalsRegistrationEnded,
            Self::EndVotingSession => Phase::VotingSessionStarted,
            Self::ConcludeTally | Self::DeclareNoConsensus => Phase::VotingSessionEnded,
            Self::RestartVotingSession => Phase::NoConsensusFound,
        }
    }

    pub fn target(self) -> Phase {
        match self {
            Self::StartProposalsRegistration => Phase::ProposalsRegistrationStarted,
            Self::EndProposalsRegistration => Phase::ProposalsRegistrationEnded,
            Self::StartVotingSession => Phase::VotingSessionStarted,
            Self::EndVotingSession => Phase::VotingSessionEnded,
            Self::ConcludeTally => Phase::VotesTallied,
            Self::DeclareNoConsensus => Phase::NoConsensusFound,
            Self::RestartVotingSession => Phase::VotingSessionStarted,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::StartProposalsRegistration => "start_proposals_registration",
            Self::EndProposalsRegistration => "end_proposals_registration",
            Self::StartVotingSession => "start_voting_session",
            Self::EndVotingSession => "end_voting_session",
            Self::ConcludeTally => "conclude_tally",
            Self::DeclareNoConsensus => "declare_no_consensus",
            Self::RestartVotingSession => "restart_voting_session",
        }
    }

    /// Check that this transition may be taken from `current`, returning the
    /// phase it leads to.
    pub fn check(self, current: Phase) -> Result<Phase, ElectionError> {
        require_phase(current, self.source())?;
        Ok(self.target())
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fail with `WrongPhase` unless `current == expected`.
pub fn require_phase(current: Phase, expected: Phase) -> Result<(), ElectionError> {
    if current != expected {
        return Err(ElectionError::WrongPhase {
            expected,
            actual: current,
        });
    }
    Ok(())
}

/// Whether the workflow has a direct edge from `from` to `to`.
pub fn is_edge(from: Phase, to: Phase) -> bool {
    Transition::ALL
        .iter()
        .any(|t| t.source() == from && t.target() == to)
}
