//! Events emitted by the election engine for external observers.

use crate::identity::Identity;
use crate::phase::Phase;
use crate::proposal::ProposalId;
use serde::{Deserialize, Serialize};

/// A committed state change. Only emitted after the change has been applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ElectionEvent {
    /// An identity was added to the voter whitelist.
    VoterRegistered { voter: Identity },
    /// The workflow moved from one phase to another.
    WorkflowStatusChange { previous: Phase, new: Phase },
    /// A proposal was appended at `proposal_id`.
    ProposalRegistered { proposal_id: ProposalId },
    /// A voter cast their ballot.
    Voted {
        voter: Identity,
        proposal_id: ProposalId,
    },
}

/// Fire-and-forget receiver of [`ElectionEvent`]s.
pub trait EventSink {
    fn emit(&self, event: &ElectionEvent);
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, event: &ElectionEvent) {
        (**self).emit(event)
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&self, event: &ElectionEvent) {
        (**self).emit(event)
    }
}
