//! Core election engine — owns all election state and enforces the workflow.

use crate::error::{ElectionError, Role};
use crate::snapshot::ElectionSnapshot;
use crate::tally::{self, TallyOutcome};
use crate::workflow::{require_phase, Transition};
use ballot_types::{
    Authorizer, ElectionEvent, ElectionParams, EventSink, Identity, Phase, Proposal, ProposalId,
    ReRegistrationPolicy, Voter,
};
use std::collections::HashMap;

/// A single election.
///
/// Mutating operations take `&mut self`; callers that share an engine across
/// threads must serialize access (see `ballot_node::ElectionNode`).
pub struct ElectionEngine<A, E> {
    authorizer: A,
    events: E,
    params: ElectionParams,
    phase: Phase,
    voters: HashMap<Identity, Voter>,
    proposals: Vec<Proposal>,
    /// Only `Some` while `phase == VotesTallied`.
    winning_proposal_id: Option<ProposalId>,
    last_tally: Option<TallyOutcome>,
}

impl<A: Authorizer, E: EventSink> ElectionEngine<A, E> {
    pub fn new(authorizer: A, events: E) -> Self {
        Self::with_params(authorizer, events, ElectionParams::default())
    }

    pub fn with_params(authorizer: A, events: E, params: ElectionParams) -> Self {
        Self {
            authorizer,
            events,
            params,
            phase: Phase::RegisteringVoters,
            voters: HashMap::new(),
            proposals: Vec::new(),
            winning_proposal_id: None,
            last_tally: None,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    pub fn winning_proposal_id(&self) -> Option<ProposalId> {
        self.winning_proposal_id
    }

    /// Outcome of the most recent tally, kept across a restart until the next one.
    pub fn last_tally(&self) -> Option<&TallyOutcome> {
        self.last_tally.as_ref()
    }

    pub fn authorizer(&self) -> &A {
        &self.authorizer
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    // ── Phase transitions ──────────────────────────────────────────────

    pub fn start_proposals_registration(&mut self, caller: &Identity) -> Result<(), ElectionError> {
        self.advance(caller, Transition::StartProposalsRegistration)
    }

    pub fn end_proposals_registration(&mut self, caller: &Identity) -> Result<(), ElectionError> {
        self.advance(caller, Transition::EndProposalsRegistration)
    }

    pub fn start_voting_session(&mut self, caller: &Identity) -> Result<(), ElectionError> {
        self.advance(caller, Transition::StartVotingSession)
    }

    pub fn end_voting_session(&mut self, caller: &Identity) -> Result<(), ElectionError> {
        self.advance(caller, Transition::EndVotingSession)
    }

    // ── Registration & voting ──────────────────────────────────────────

    /// Whitelist `voter`. Administrator only, during `RegisteringVoters`.
    pub fn register_voter(
        &mut self,
        caller: &Identity,
        voter: Identity,
    ) -> Result<(), ElectionError> {
        self.require_admin(caller)?;
        require_phase(self.phase, Phase::RegisteringVoters)?;

        let already = self.voters.get(&voter).is_some_and(|v| v.is_registered);
        if already && self.params.reregistration == ReRegistrationPolicy::Ignore {
            tracing::debug!(voter = %voter, "voter already registered, ignoring");
            return Ok(());
        }

        self.voters.insert(voter.clone(), Voter::registered());
        tracing::debug!(voter = %voter, reregistered = already, "voter registered");
        self.events.emit(&ElectionEvent::VoterRegistered { voter });
        Ok(())
    }

    /// Append a proposal and return its id.
    ///
    /// An empty description is refused before any other check.
    pub fn register_proposal(
        &mut self,
        caller: &Identity,
        description: &str,
    ) -> Result<ProposalId, ElectionError> {
        if description.is_empty() {
            return Err(ElectionError::EmptyDescription);
        }
        self.require_voter(caller)?;
        require_phase(self.phase, Phase::ProposalsRegistrationStarted)?;
        if !self.params.description_fits(description.len()) {
            return Err(ElectionError::DescriptionTooLong {
                len: description.len(),
                max: self.params.max_description_len,
            });
        }

        self.proposals.push(Proposal::new(description));
        let proposal_id = ProposalId::new(self.proposals.len() - 1);
        tracing::debug!(caller = %caller, proposal = %proposal_id, "proposal registered");
        self.events
            .emit(&ElectionEvent::ProposalRegistered { proposal_id });
        Ok(proposal_id)
    }

    /// Cast `caller`'s single ballot for `proposal_id`.
    pub fn vote_for_proposal(
        &mut self,
        caller: &Identity,
        proposal_id: ProposalId,
    ) -> Result<(), ElectionError> {
        self.require_voter(caller)?;
        require_phase(self.phase, Phase::VotingSessionStarted)?;
        if self.voters.get(caller).is_some_and(|v| v.has_voted) {
            return Err(ElectionError::AlreadyVoted(caller.clone()));
        }
        let count = self.proposals.len();
        let Some(proposal) = self.proposals.get_mut(proposal_id.index()) else {
            return Err(ElectionError::InvalidProposal {
                id: proposal_id,
                count,
            });
        };

        proposal.vote_count += 1;
        // An externally authorized voter may have no record yet.
        let record = self.voters.entry(caller.clone()).or_insert_with(Voter::registered);
        record.has_voted = true;
        record.voted_proposal_id = Some(proposal_id);

        tracing::debug!(voter = %caller, proposal = %proposal_id, "vote cast");
        self.events.emit(&ElectionEvent::Voted {
            voter: caller.clone(),
            proposal_id,
        });
        Ok(())
    }

    // ── Tally & restart ────────────────────────────────────────────────

    /// Count the votes. A unique maximum elects its proposal; any tie at the
    /// maximum moves the election to `NoConsensusFound`.
    pub fn tally_votes(&mut self, caller: &Identity) -> Result<TallyOutcome, ElectionError> {
        self.require_admin(caller)?;
        require_phase(self.phase, Transition::ConcludeTally.source())?;
        let outcome = tally::tally(&self.proposals).ok_or(ElectionError::NoProposals)?;

        match &outcome {
            TallyOutcome::Winner { proposal_id, votes } => {
                tracing::info!(winner = %proposal_id, votes, "tally found a winner");
                self.winning_proposal_id = Some(*proposal_id);
                self.apply(Transition::ConcludeTally);
            }
            TallyOutcome::Tie { max_votes, leaders } => {
                tracing::info!(
                    max_votes,
                    leaders = leaders.len(),
                    "tally tied, no consensus"
                );
                self.winning_proposal_id = None;
                self.apply(Transition::DeclareNoConsensus);
            }
        }
        self.last_tally = Some(outcome.clone());
        Ok(outcome)
    }

    /// Re-open voting among the tied leaders.
    ///
    /// Proposals below the tied maximum are dropped and the survivors re-indexed
    /// from 0 with zeroed counts. Every voter's ballot is cleared. Returns the
    /// number of surviving proposals.
    pub fn restart_voting_session(&mut self, caller: &Identity) -> Result<usize, ElectionError> {
        self.require_admin(caller)?;
        Transition::RestartVotingSession.check(self.phase)?;

        let before = self.proposals.len();
        let survivors = tally::retain_leaders(&mut self.proposals);
        for voter in self.voters.values_mut() {
            voter.reset_ballot();
        }
        tracing::info!(
            pruned = before - survivors,
            survivors,
            "voting session restarted among tied leaders"
        );
        self.apply(Transition::RestartVotingSession);
        Ok(survivors)
    }

    // ── Views ──────────────────────────────────────────────────────────

    /// The elected proposal. Only available once the votes are tallied.
    ///
    /// The winning id is set exactly when the phase is `VotesTallied`, and the
    /// proposal set is frozen from then on.
    pub fn winning_proposal(&self) -> Result<&Proposal, ElectionError> {
        match self.winning_proposal_id {
            Some(id) => self.proposals.get(id.index()).ok_or(ElectionError::InvalidProposal {
                id,
                count: self.proposals.len(),
            }),
            None if self.phase == Phase::NoConsensusFound => Err(ElectionError::NoConsensus),
            None => Err(ElectionError::WrongPhase {
                expected: Phase::VotesTallied,
                actual: self.phase,
            }),
        }
    }

    /// Look up another participant's record. Registered voters only.
    pub fn voter(&self, caller: &Identity, who: &Identity) -> Result<Option<&Voter>, ElectionError> {
        self.require_voter(caller)?;
        Ok(self.voters.get(who))
    }

    /// Look up a proposal by id. Registered voters only.
    pub fn proposal(&self, caller: &Identity, id: ProposalId) -> Result<&Proposal, ElectionError> {
        self.require_voter(caller)?;
        self.proposals
            .get(id.index())
            .ok_or(ElectionError::InvalidProposal {
                id,
                count: self.proposals.len(),
            })
    }

    pub fn snapshot(&self) -> ElectionSnapshot {
        let mut voters: Vec<(Identity, Voter)> = self
            .voters
            .iter()
            .map(|(id, v)| (id.clone(), v.clone()))
            .collect();
        voters.sort_by(|a, b| a.0.cmp(&b.0));
        ElectionSnapshot {
            phase: self.phase,
            voters,
            proposals: self.proposals.clone(),
            winning_proposal_id: self.winning_proposal_id,
        }
    }

    // ── Guards ─────────────────────────────────────────────────────────

    fn require_admin(&self, caller: &Identity) -> Result<(), ElectionError> {
        if !self.authorizer.is_administrator(caller) {
            tracing::warn!(caller = %caller, phase = %self.phase, "rejected non-administrator");
            return Err(ElectionError::Unauthorized {
                caller: caller.clone(),
                role: Role::Administrator,
            });
        }
        Ok(())
    }

    fn require_voter(&self, caller: &Identity) -> Result<(), ElectionError> {
        if !self
            .authorizer
            .is_registered_voter(caller, self.voters.get(caller))
        {
            return Err(ElectionError::Unauthorized {
                caller: caller.clone(),
                role: Role::Voter,
            });
        }
        Ok(())
    }

    /// Administrator-gated, table-checked transition.
    fn advance(&mut self, caller: &Identity, transition: Transition) -> Result<(), ElectionError> {
        self.require_admin(caller)?;
        transition.check(self.phase)?;
        self.apply(transition);
        Ok(())
    }

    /// Commit a transition already validated against the table.
    fn apply(&mut self, transition: Transition) {
        let previous = self.phase;
        let new = transition.target();
        debug_assert_eq!(previous, transition.source());
        self.phase = new;
        tracing::info!(%previous, %new, transition = %transition, "workflow status changed");
        self.events
            .emit(&ElectionEvent::WorkflowStatusChange { previous, new });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_nullables::{NullAuthorizer, NullEventSink};

    fn id(s: &str) -> Identity {
        Identity::parse(s).unwrap()
    }

    fn engine() -> ElectionEngine<NullAuthorizer, NullEventSink> {
        ElectionEngine::new(NullAuthorizer::new(id("owner")), NullEventSink::new())
    }

    /// Helper: drive a fresh engine to `VotingSessionStarted` with voters a, b, c
    /// and proposals "X", "Y", "Z".
    fn voting_engine() -> ElectionEngine<NullAuthorizer, NullEventSink> {
        let owner = id("owner");
        let mut e = engine();
        for v in ["a", "b", "c"] {
            e.register_voter(&owner, id(v)).unwrap();
        }
        e.start_proposals_registration(&owner).unwrap();
        for (v, d) in [("a", "X"), ("b", "Y"), ("c", "Z")] {
            e.register_proposal(&id(v), d).unwrap();
        }
        e.end_proposals_registration(&owner).unwrap();
        e.start_voting_session(&owner).unwrap();
        e.events().clear();
        e
    }

    #[test]
    fn new_engine_starts_registering_voters() {
        let e = engine();
        assert_eq!(e.phase(), Phase::RegisteringVoters);
        assert_eq!(e.proposal_count(), 0);
        assert_eq!(e.winning_proposal_id(), None);
    }

    #[test]
    fn transition_emits_previous_and_new() {
        let mut e = engine();
        e.start_proposals_registration(&id("owner")).unwrap();
        assert_eq!(
            e.events().events(),
            vec![ElectionEvent::WorkflowStatusChange {
                previous: Phase::RegisteringVoters,
                new: Phase::ProposalsRegistrationStarted,
            }]
        );
    }

    #[test]
    fn unauthorized_checked_before_phase() {
        let mut e = engine();
        let err = e.end_voting_session(&id("mallory")).unwrap_err();
        assert!(matches!(
            err,
            ElectionError::Unauthorized {
                role: Role::Administrator,
                ..
            }
        ));
        assert!(e.events().is_empty());
    }

    #[test]
    fn register_voter_emits_event() {
        let mut e = engine();
        e.register_voter(&id("owner"), id("alice")).unwrap();
        assert_eq!(
            e.events().events(),
            vec![ElectionEvent::VoterRegistered { voter: id("alice") }]
        );
        let snap = e.snapshot();
        assert_eq!(snap.voters, vec![(id("alice"), Voter::registered())]);
    }

    #[test]
    fn reregistration_ignored_by_default() {
        let mut e = engine();
        e.register_voter(&id("owner"), id("alice")).unwrap();
        e.register_voter(&id("owner"), id("alice")).unwrap();
        assert_eq!(e.events().len(), 1);
    }

    #[test]
    fn reregistration_reset_vote_policy_emits_again() {
        let params = ElectionParams {
            reregistration: ReRegistrationPolicy::ResetVote,
            ..ElectionParams::default()
        };
        let mut e = ElectionEngine::with_params(
            NullAuthorizer::new(id("owner")),
            NullEventSink::new(),
            params,
        );
        e.register_voter(&id("owner"), id("alice")).unwrap();
        e.register_voter(&id("owner"), id("alice")).unwrap();
        assert_eq!(e.events().len(), 2);
    }

    #[test]
    fn register_proposal_returns_sequential_ids() {
        let owner = id("owner");
        let mut e = engine();
        e.register_voter(&owner, id("a")).unwrap();
        e.start_proposals_registration(&owner).unwrap();
        assert_eq!(e.register_proposal(&id("a"), "X").unwrap(), ProposalId::new(0));
        assert_eq!(e.register_proposal(&id("a"), "Y").unwrap(), ProposalId::new(1));
        assert_eq!(
            e.events().events().last(),
            Some(&ElectionEvent::ProposalRegistered {
                proposal_id: ProposalId::new(1)
            })
        );
    }

    #[test]
    fn empty_description_wins_over_every_other_check() {
        let mut e = engine();
        // not a voter, wrong phase
        assert_eq!(
            e.register_proposal(&id("mallory"), ""),
            Err(ElectionError::EmptyDescription)
        );
    }

    #[test]
    fn description_limit_enforced() {
        let owner = id("owner");
        let params = ElectionParams {
            max_description_len: 3,
            ..ElectionParams::default()
        };
        let mut e = ElectionEngine::with_params(
            NullAuthorizer::new(owner.clone()),
            NullEventSink::new(),
            params,
        );
        e.register_voter(&owner, id("a")).unwrap();
        e.start_proposals_registration(&owner).unwrap();
        assert_eq!(
            e.register_proposal(&id("a"), "four"),
            Err(ElectionError::DescriptionTooLong { len: 4, max: 3 })
        );
        assert!(e.register_proposal(&id("a"), "two").is_ok());
    }

    #[test]
    fn vote_records_ballot_and_count() {
        let mut e = voting_engine();
        e.vote_for_proposal(&id("a"), ProposalId::new(1)).unwrap();

        let record = e.voter(&id("b"), &id("a")).unwrap().unwrap();
        assert!(record.has_voted);
        assert_eq!(record.voted_proposal_id, Some(ProposalId::new(1)));
        assert_eq!(e.proposal(&id("b"), ProposalId::new(1)).unwrap().vote_count, 1);
        assert_eq!(
            e.events().events(),
            vec![ElectionEvent::Voted {
                voter: id("a"),
                proposal_id: ProposalId::new(1),
            }]
        );
    }

    #[test]
    fn second_vote_rejected_for_any_target() {
        let mut e = voting_engine();
        e.vote_for_proposal(&id("a"), ProposalId::new(0)).unwrap();
        for target in [0, 1, 2, 99] {
            assert_eq!(
                e.vote_for_proposal(&id("a"), ProposalId::new(target)),
                Err(ElectionError::AlreadyVoted(id("a")))
            );
        }
        assert_eq!(e.proposals()[0].vote_count, 1);
    }

    #[test]
    fn out_of_range_vote_leaves_no_trace() {
        let mut e = voting_engine();
        let before = e.snapshot();
        assert_eq!(
            e.vote_for_proposal(&id("a"), ProposalId::new(3)),
            Err(ElectionError::InvalidProposal {
                id: ProposalId::new(3),
                count: 3,
            })
        );
        assert_eq!(e.snapshot(), before);
        assert!(e.events().is_empty());
    }

    #[test]
    fn unregistered_cannot_vote() {
        let mut e = voting_engine();
        assert!(matches!(
            e.vote_for_proposal(&id("mallory"), ProposalId::new(0)),
            Err(ElectionError::Unauthorized {
                role: Role::Voter,
                ..
            })
        ));
    }

    #[test]
    fn externally_authorized_voter_gets_a_record_on_vote() {
        let mut e = ElectionEngine::new(
            NullAuthorizer::new(id("owner")).with_external_voters([id("guest")]),
            NullEventSink::new(),
        );
        let owner = id("owner");
        e.start_proposals_registration(&owner).unwrap();
        e.register_proposal(&id("guest"), "X").unwrap();
        e.end_proposals_registration(&owner).unwrap();
        e.start_voting_session(&owner).unwrap();
        e.vote_for_proposal(&id("guest"), ProposalId::new(0)).unwrap();
        let record = e.voter(&id("guest"), &id("guest")).unwrap().unwrap();
        assert!(record.has_voted);
    }

    #[test]
    fn revoked_voter_loses_access() {
        let mut e = voting_engine();
        e.authorizer().revoke(&id("a"));
        assert!(matches!(
            e.vote_for_proposal(&id("a"), ProposalId::new(0)),
            Err(ElectionError::Unauthorized { .. })
        ));
    }

    #[test]
    fn tally_with_unique_max_elects_winner() {
        let owner = id("owner");
        let mut e = voting_engine();
        e.vote_for_proposal(&id("a"), ProposalId::new(2)).unwrap();
        e.vote_for_proposal(&id("b"), ProposalId::new(2)).unwrap();
        e.vote_for_proposal(&id("c"), ProposalId::new(0)).unwrap();
        e.end_voting_session(&owner).unwrap();

        let outcome = e.tally_votes(&owner).unwrap();
        assert_eq!(
            outcome,
            TallyOutcome::Winner {
                proposal_id: ProposalId::new(2),
                votes: 2,
            }
        );
        assert_eq!(e.phase(), Phase::VotesTallied);
        assert_eq!(e.winning_proposal().unwrap().description, "Z");
        assert_eq!(e.last_tally(), Some(&outcome));
    }

    #[test]
    fn tally_without_proposals_fails() {
        let owner = id("owner");
        let mut e = engine();
        e.start_proposals_registration(&owner).unwrap();
        e.end_proposals_registration(&owner).unwrap();
        e.start_voting_session(&owner).unwrap();
        e.end_voting_session(&owner).unwrap();
        assert_eq!(e.tally_votes(&owner), Err(ElectionError::NoProposals));
        assert_eq!(e.phase(), Phase::VotingSessionEnded);
    }

    #[test]
    fn winner_query_errors_by_phase() {
        let owner = id("owner");
        let mut e = voting_engine();
        assert_eq!(
            e.winning_proposal(),
            Err(ElectionError::WrongPhase {
                expected: Phase::VotesTallied,
                actual: Phase::VotingSessionStarted,
            })
        );
        e.end_voting_session(&owner).unwrap();
        e.tally_votes(&owner).unwrap(); // 0-0-0 tie
        assert_eq!(e.winning_proposal(), Err(ElectionError::NoConsensus));
    }

    #[test]
    fn restart_keeps_leaders_and_clears_ballots() {
        let owner = id("owner");
        let mut e = voting_engine();
        e.vote_for_proposal(&id("a"), ProposalId::new(0)).unwrap();
        e.vote_for_proposal(&id("b"), ProposalId::new(2)).unwrap();
        e.end_voting_session(&owner).unwrap();
        e.tally_votes(&owner).unwrap();
        assert_eq!(e.phase(), Phase::NoConsensusFound);

        assert_eq!(e.restart_voting_session(&owner).unwrap(), 2);
        assert_eq!(e.phase(), Phase::VotingSessionStarted);
        let descriptions: Vec<_> = e.proposals().iter().map(|p| p.description.as_str()).collect();
        assert_eq!(descriptions, vec!["X", "Z"]);
        assert!(e.proposals().iter().all(|p| p.vote_count == 0));
        assert!(e
            .snapshot()
            .voters
            .iter()
            .all(|(_, v)| !v.has_voted && v.voted_proposal_id.is_none()));

        // a fresh round is possible
        e.vote_for_proposal(&id("a"), ProposalId::new(1)).unwrap();
    }

    #[test]
    fn restart_requires_no_consensus_phase() {
        let owner = id("owner");
        let mut e = voting_engine();
        assert_eq!(
            e.restart_voting_session(&owner),
            Err(ElectionError::WrongPhase {
                expected: Phase::NoConsensusFound,
                actual: Phase::VotingSessionStarted,
            })
        );
    }

    #[test]
    fn views_are_voter_only() {
        let e = voting_engine();
        assert!(e.proposal(&id("mallory"), ProposalId::new(0)).is_err());
        assert!(e.voter(&id("owner"), &id("a")).is_err());
        assert_eq!(
            e.proposal(&id("a"), ProposalId::new(5)),
            Err(ElectionError::InvalidProposal {
                id: ProposalId::new(5),
                count: 3,
            })
        );
    }
}
