//! Serializable point-in-time view of an election.

use ballot_types::{Identity, Phase, Proposal, ProposalId, Voter};
use serde::{Deserialize, Serialize};

/// Everything the engine owns, in a deterministic order.
///
/// Voters are sorted by identity so two snapshots of equal state compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSnapshot {
    pub phase: Phase,
    pub voters: Vec<(Identity, Voter)>,
    pub proposals: Vec<Proposal>,
    pub winning_proposal_id: Option<ProposalId>,
}
