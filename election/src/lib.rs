//! Election workflow engine.
//!
//! One election per [`ElectionEngine`]:
//! RegisteringVoters → ProposalsRegistrationStarted → ProposalsRegistrationEnded
//! → VotingSessionStarted → VotingSessionEnded → VotesTallied,
//! with a tied tally branching to NoConsensusFound and a restart re-opening voting
//! among the tied leaders.
//!
//! Key principle: one registered identity = one vote per voting round.
//! Every operation validates completely before mutating, so a failed call leaves
//! the engine exactly as it was and emits nothing.

pub mod engine;
pub mod error;
pub mod snapshot;
pub mod tally;
pub mod workflow;

pub use engine::ElectionEngine;
pub use error::{ElectionError, Role};
pub use snapshot::ElectionSnapshot;
pub use tally::TallyOutcome;
pub use workflow::Transition;
