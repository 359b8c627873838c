use proptest::prelude::*;

use ballot_election::tally::{retain_leaders, tally};
use ballot_election::{ElectionEngine, TallyOutcome};
use ballot_nullables::{NullAuthorizer, NullEventSink};
use ballot_types::{Identity, Phase, Proposal, ProposalId};

fn proposals(counts: &[u64]) -> Vec<Proposal> {
    counts
        .iter()
        .map(|&vote_count| Proposal {
            description: "p".to_string(),
            vote_count,
        })
        .collect()
}

proptest! {
    /// Tally is total: a non-empty set always yields exactly one outcome, and that
    /// outcome agrees with a direct count of the maximum.
    #[test]
    fn tally_matches_direct_count(counts in prop::collection::vec(0u64..8, 1..24)) {
        let max = *counts.iter().max().unwrap();
        let holders: Vec<usize> = counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == max)
            .map(|(i, _)| i)
            .collect();

        match tally(&proposals(&counts)).unwrap() {
            TallyOutcome::Winner { proposal_id, votes } => {
                prop_assert_eq!(holders.len(), 1);
                prop_assert_eq!(proposal_id.index(), holders[0]);
                prop_assert_eq!(votes, max);
            }
            TallyOutcome::Tie { max_votes, leaders } => {
                prop_assert!(holders.len() > 1);
                prop_assert_eq!(max_votes, max);
                let leaders: Vec<usize> = leaders.iter().map(|id| id.index()).collect();
                prop_assert_eq!(leaders, holders);
            }
        }
    }

    /// Scan direction does not matter: reversing the input flips only the winner index.
    #[test]
    fn tally_is_direction_independent(counts in prop::collection::vec(0u64..8, 1..24)) {
        let forward = tally(&proposals(&counts)).unwrap();
        let mut reversed_counts = counts.clone();
        reversed_counts.reverse();
        let backward = tally(&proposals(&reversed_counts)).unwrap();

        prop_assert_eq!(forward.is_consensus(), backward.is_consensus());
        prop_assert_eq!(forward.max_votes(), backward.max_votes());
        if let (
            TallyOutcome::Winner { proposal_id: f, .. },
            TallyOutcome::Winner { proposal_id: b, .. },
        ) = (&forward, &backward)
        {
            prop_assert_eq!(f.index(), counts.len() - 1 - b.index());
        }
    }

    /// Restart keeps exactly the holders of the maximum, in order, with zeroed counts.
    #[test]
    fn retain_leaders_keeps_only_maximum(counts in prop::collection::vec(0u64..8, 1..24)) {
        let max = *counts.iter().max().unwrap();
        let mut set: Vec<Proposal> = counts
            .iter()
            .enumerate()
            .map(|(i, &vote_count)| Proposal { description: i.to_string(), vote_count })
            .collect();
        let expected: Vec<String> = counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == max)
            .map(|(i, _)| i.to_string())
            .collect();

        let survivors = retain_leaders(&mut set);
        prop_assert_eq!(survivors, expected.len());
        let kept: Vec<String> = set.iter().map(|p| p.description.clone()).collect();
        prop_assert_eq!(kept, expected);
        prop_assert!(set.iter().all(|p| p.vote_count == 0));
    }

    /// Whole elections with arbitrary ballots end in the phase the tally predicts,
    /// and every vote is counted exactly once.
    #[test]
    fn random_ballots_are_counted_once(
        n_proposals in 1usize..6,
        ballots in prop::collection::vec(0usize..6, 0..20),
    ) {
        let owner = Identity::parse("owner").unwrap();
        let mut e = ElectionEngine::new(NullAuthorizer::new(owner.clone()), NullEventSink::new());
        let voters: Vec<Identity> = (0..ballots.len())
            .map(|i| Identity::parse(format!("v{i}")).unwrap())
            .collect();
        let proposer = Identity::parse("proposer").unwrap();

        e.register_voter(&owner, proposer.clone()).unwrap();
        for v in &voters {
            e.register_voter(&owner, v.clone()).unwrap();
        }
        e.start_proposals_registration(&owner).unwrap();
        for i in 0..n_proposals {
            e.register_proposal(&proposer, &format!("proposal {i}")).unwrap();
        }
        e.end_proposals_registration(&owner).unwrap();
        e.start_voting_session(&owner).unwrap();

        let mut expected = vec![0u64; n_proposals];
        for (v, &choice) in voters.iter().zip(&ballots) {
            let result = e.vote_for_proposal(v, ProposalId::new(choice));
            if choice < n_proposals {
                prop_assert!(result.is_ok());
                expected[choice] += 1;
            } else {
                prop_assert!(result.is_err());
            }
        }
        let counted: Vec<u64> = e.proposals().iter().map(|p| p.vote_count).collect();
        prop_assert_eq!(&counted, &expected);

        e.end_voting_session(&owner).unwrap();
        let outcome = e.tally_votes(&owner).unwrap();
        if outcome.is_consensus() {
            prop_assert_eq!(e.phase(), Phase::VotesTallied);
        } else {
            prop_assert_eq!(e.phase(), Phase::NoConsensusFound);
        }
    }
}
