use ballot_types::{Identity, Phase, ProposalId};
use std::fmt;
use thiserror::Error;

/// The role an operation demands of its caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Administrator,
    Voter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Administrator => f.write_str("administrator"),
            Self::Voter => f.write_str("registered voter"),
        }
    }
}

/// Every way an election operation can be refused. None of these are transient.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ElectionError {
    #[error("{caller} is not authorized: {role} required")]
    Unauthorized { caller: Identity, role: Role },

    #[error("wrong phase: expected {expected}, current phase is {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("voter {0} has already voted")]
    AlreadyVoted(Identity),

    #[error("proposal {id} not found: {count} proposals registered")]
    InvalidProposal { id: ProposalId, count: usize },

    #[error("proposal description is empty")]
    EmptyDescription,

    #[error("proposal description too long: {len} > {max} bytes")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("no proposals to tally")]
    NoProposals,

    #[error("no consensus: the tally ended in a tie")]
    NoConsensus,
}
