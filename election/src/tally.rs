//! Vote counting and tie resolution.

use ballot_types::{Proposal, ProposalId};
use serde::{Deserialize, Serialize};

/// The result of tallying a non-empty proposal set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TallyOutcome {
    /// Exactly one proposal holds the maximum.
    Winner { proposal_id: ProposalId, votes: u64 },
    /// Two or more proposals share the maximum. `leaders` is in id order.
    Tie {
        max_votes: u64,
        leaders: Vec<ProposalId>,
    },
}

impl TallyOutcome {
    pub fn is_consensus(&self) -> bool {
        matches!(self, Self::Winner { .. })
    }

    pub fn max_votes(&self) -> u64 {
        match self {
            Self::Winner { votes, .. } => *votes,
            Self::Tie { max_votes, .. } => *max_votes,
        }
    }
}

/// Scan every proposal once, tracking the running maximum and whether it is shared.
///
/// A strictly greater count takes the lead and clears the tie; an equal count sets
/// it. Returns `None` for an empty slice.
pub fn tally(proposals: &[Proposal]) -> Option<TallyOutcome> {
    let mut leader: Option<(usize, u64)> = None;
    let mut tied = false;

    for (index, proposal) in proposals.iter().enumerate() {
        match leader {
            Some((_, max)) if proposal.vote_count < max => {}
            Some((_, max)) if proposal.vote_count == max => tied = true,
            _ => {
                leader = Some((index, proposal.vote_count));
                tied = false;
            }
        }
    }

    let (index, max_votes) = leader?;
    if !tied {
        return Some(TallyOutcome::Winner {
            proposal_id: ProposalId::new(index),
            votes: max_votes,
        });
    }

    let leaders = proposals
        .iter()
        .enumerate()
        .filter(|(_, p)| p.vote_count == max_votes)
        .map(|(i, _)| ProposalId::new(i))
        .collect();
    Some(TallyOutcome::Tie { max_votes, leaders })
}

/// Drop every proposal below the maximum and zero the survivors' counts.
///
/// Survivors keep their relative order and are re-indexed from 0. Returns the
/// number of survivors.
pub fn retain_leaders(proposals: &mut Vec<Proposal>) -> usize {
    let Some(max_votes) = proposals.iter().map(|p| p.vote_count).max() else {
        return 0;
    };
    proposals.retain(|p| p.vote_count >= max_votes);
    for proposal in proposals.iter_mut() {
        proposal.vote_count = 0;
    }
    proposals.len()
}
