//! The election node — one engine, one lock, one critical section per call.

use std::sync::{Mutex, MutexGuard};

use ballot_election::{ElectionEngine, ElectionSnapshot, TallyOutcome};
use ballot_types::{AdminAuthorizer, Identity, Phase, Proposal, ProposalId, Voter};

use crate::config::NodeConfig;
use crate::error::NodeError;
use crate::event_bus::EventBus;
use crate::tracing_spans::{operation_span, query_span};

type Engine = ElectionEngine<AdminAuthorizer, EventBus>;

/// Hosts a single election for any number of concurrent callers.
///
/// Each public method locks the engine once and performs validation and mutation
/// under that lock, so concurrent calls are applied one at a time and a failed
/// call never leaves partial state behind.
pub struct ElectionNode {
    name: String,
    engine: Mutex<Engine>,
}

impl ElectionNode {
    /// Build a node from configuration with an empty event bus.
    pub fn from_config(config: NodeConfig) -> Self {
        Self::new(config, EventBus::new())
    }

    /// Build a node delivering events to `bus`.
    ///
    /// When `config.log_events` is set, a listener writing each event to the log
    /// as JSON is added after the caller's listeners.
    pub fn new(config: NodeConfig, mut bus: EventBus) -> Self {
        if config.log_events {
            let election = config.election_name.clone();
            bus.subscribe(Box::new(move |event| {
                match serde_json::to_string(event) {
                    Ok(json) => tracing::info!(election = %election, event = %json, "election event"),
                    Err(e) => tracing::warn!(election = %election, "unserializable event: {e}"),
                }
            }));
        }

        let authorizer = AdminAuthorizer::new(config.administrator.clone());
        let engine = ElectionEngine::with_params(authorizer, bus, config.params.clone());
        tracing::info!(
            election = %config.election_name,
            administrator = %config.administrator,
            reregistration = %config.params.reregistration,
            "election node created"
        );
        Self {
            name: config.election_name,
            engine: Mutex::new(engine),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> Result<MutexGuard<'_, Engine>, NodeError> {
        self.engine.lock().map_err(|_| NodeError::LockPoisoned)
    }

    /// Run `op` on the engine inside one critical section under an operation span.
    fn with_engine<T>(
        &self,
        operation: &'static str,
        caller: &Identity,
        op: impl FnOnce(&mut Engine) -> Result<T, ballot_election::ElectionError>,
    ) -> Result<T, NodeError> {
        let _span = operation_span(&self.name, operation, caller).entered();
        let mut engine = self.lock()?;
        Ok(op(&mut engine)?)
    }

    // ── Phase transitions ──────────────────────────────────────────────

    pub fn start_proposals_registration(&self, caller: &Identity) -> Result<(), NodeError> {
        self.with_engine("start_proposals_registration", caller, |e| {
            e.start_proposals_registration(caller)
        })
    }

    pub fn end_proposals_registration(&self, caller: &Identity) -> Result<(), NodeError> {
        self.with_engine("end_proposals_registration", caller, |e| {
            e.end_proposals_registration(caller)
        })
    }

    pub fn start_voting_session(&self, caller: &Identity) -> Result<(), NodeError> {
        self.with_engine("start_voting_session", caller, |e| e.start_voting_session(caller))
    }

    pub fn end_voting_session(&self, caller: &Identity) -> Result<(), NodeError> {
        self.with_engine("end_voting_session", caller, |e| e.end_voting_session(caller))
    }

    // ── Registration & voting ──────────────────────────────────────────

    pub fn register_voter(&self, caller: &Identity, voter: Identity) -> Result<(), NodeError> {
        self.with_engine("register_voter", caller, |e| e.register_voter(caller, voter))
    }

    pub fn register_proposal(
        &self,
        caller: &Identity,
        description: &str,
    ) -> Result<ProposalId, NodeError> {
        self.with_engine("register_proposal", caller, |e| {
            e.register_proposal(caller, description)
        })
    }

    pub fn vote_for_proposal(
        &self,
        caller: &Identity,
        proposal_id: ProposalId,
    ) -> Result<(), NodeError> {
        self.with_engine("vote_for_proposal", caller, |e| {
            e.vote_for_proposal(caller, proposal_id)
        })
    }

    // ── Tally & restart ────────────────────────────────────────────────

    pub fn tally_votes(&self, caller: &Identity) -> Result<TallyOutcome, NodeError> {
        self.with_engine("tally_votes", caller, |e| e.tally_votes(caller))
    }

    pub fn restart_voting_session(&self, caller: &Identity) -> Result<usize, NodeError> {
        self.with_engine("restart_voting_session", caller, |e| {
            e.restart_voting_session(caller)
        })
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn phase(&self) -> Result<Phase, NodeError> {
        Ok(self.lock()?.phase())
    }

    pub fn winning_proposal(&self) -> Result<Proposal, NodeError> {
        let _span = query_span(&self.name, "winning_proposal").entered();
        Ok(self.lock()?.winning_proposal()?.clone())
    }

    pub fn voter(&self, caller: &Identity, who: &Identity) -> Result<Option<Voter>, NodeError> {
        let _span = query_span(&self.name, "voter").entered();
        Ok(self.lock()?.voter(caller, who)?.cloned())
    }

    pub fn proposal(&self, caller: &Identity, id: ProposalId) -> Result<Proposal, NodeError> {
        let _span = query_span(&self.name, "proposal").entered();
        Ok(self.lock()?.proposal(caller, id)?.clone())
    }

    pub fn snapshot(&self) -> Result<ElectionSnapshot, NodeError> {
        Ok(self.lock()?.snapshot())
    }
}
