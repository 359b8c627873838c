//! Fundamental types for the ballot election workflow.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! participant identities, workflow phases, voters, proposals, election parameters,
//! emitted events, and the collaborator traits the engine is built against.

pub mod access;
pub mod error;
pub mod event;
pub mod identity;
pub mod params;
pub mod phase;
pub mod proposal;
pub mod voter;

pub use access::{AdminAuthorizer, Authorizer};
pub use error::TypesError;
pub use event::{ElectionEvent, EventSink};
pub use identity::Identity;
pub use params::{ElectionParams, ReRegistrationPolicy};
pub use phase::Phase;
pub use proposal::{Proposal, ProposalId};
pub use voter::Voter;
