#![no_main]

//! Fuzz harness for `stellar_vote`, the election registry.
//!
//! Replays arbitrary action sequences from a small pool of principals and
//! checks the tally invariants after every step:
//!
//! - `total_votes` equals the sum of candidate `vote_count`s
//! - every tracked ballot names an existing candidate
//! - no voter ever holds two ballots, and tallies never shrink
//! - an Ended election never accepts a vote and cannot be ended again
//! - strangers never administer an election

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Env, String,
};
use stellar_vote::{
    election::ElectionStatus, policy::ElectionPolicy, StellarVoteContract,
    StellarVoteContractClient, VoteError,
};

const VOTERS: usize = 4;

/// Actions covering every mutating registry entry point.
///
/// Indices are small and reduced modulo the relevant pool at execution time
/// so that most inputs hit live elections, candidates and voters.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    CreateElection { by_owner: bool, title_len: u8, duration: u32 },
    AddCandidate { election: u8, candidate: u8, name_len: u8, by_owner: bool },
    RegisterVoter { election: u8, voter: u8, by_owner: bool },
    CastVote { election: u8, voter: u8, candidate: u8 },
    EndElection { election: u8, by_owner: bool },
    AdvanceLedger { delta: u8 },
}

#[derive(Arbitrary, Debug)]
pub struct FuzzInput {
    require_registration: bool,
    freeze_after_end: bool,
    actions: Vec<FuzzAction>,
}

fn text(env: &Env, len: u8) -> String {
    let raw = "x".repeat(len as usize);
    String::from_str(env, &raw)
}

fuzz_target!(|input: FuzzInput| {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let stranger = Address::generate(&env);
    let voters: Vec<Address> = (0..VOTERS).map(|_| Address::generate(&env)).collect();

    let contract_id = env.register(StellarVoteContract, ());
    let client = StellarVoteContractClient::new(&env, &contract_id);

    let policy = ElectionPolicy {
        require_registration: input.require_registration,
        freeze_after_end: input.freeze_after_end,
    };
    if client.try_initialize(&owner, &policy).is_err() {
        return;
    }

    let admin = |by_owner: bool| if by_owner { owner.clone() } else { stranger.clone() };
    let pick = |index: u8| -> u64 {
        let count = client.get_election_count();
        index as u64 % (count + 1)
    };

    for action in input.actions {
        let totals_before: Vec<u64> = (0..client.get_election_count())
            .map(|id| client.get_election(&id).map(|e| e.total_votes).unwrap_or(0))
            .collect();

        match action {
            FuzzAction::CreateElection { by_owner, title_len, duration } => {
                let before = client.get_election_count();
                let result = client.try_create_election(
                    &admin(by_owner),
                    &text(&env, title_len),
                    &text(&env, 0),
                    &duration,
                );
                let after = client.get_election_count();
                match result {
                    Ok(Ok(id)) => {
                        assert!(by_owner, "INVARIANT VIOLATION: stranger created an election");
                        assert_eq!(id, before, "INVARIANT VIOLATION: id not dense");
                        assert_eq!(after, before + 1);
                    }
                    _ => assert_eq!(after, before, "INVARIANT VIOLATION: rejected create allocated an id"),
                }
            }
            FuzzAction::AddCandidate { election, candidate, name_len, by_owner } => {
                let id = pick(election);
                let result = client.try_add_candidate(
                    &admin(by_owner),
                    &id,
                    &((candidate % 8) as u64),
                    &text(&env, name_len),
                );
                if !by_owner {
                    assert_eq!(result, Err(Ok(VoteError::Unauthorized)));
                }
            }
            FuzzAction::RegisterVoter { election, voter, by_owner } => {
                let id = pick(election);
                let who = &voters[voter as usize % VOTERS];
                let result = client.try_register_voter(&admin(by_owner), &id, who);
                if !by_owner {
                    assert_eq!(result, Err(Ok(VoteError::Unauthorized)));
                }
            }
            FuzzAction::CastVote { election, voter, candidate } => {
                let id = pick(election);
                let who = &voters[voter as usize % VOTERS];
                let record = client.get_election(&id);
                let voted_before = client.has_voted(&id, who);
                let result = client.try_cast_vote(who, &id, &((candidate % 8) as u64));

                match record {
                    None => assert_eq!(result, Err(Ok(VoteError::ElectionNotFound))),
                    Some(e) if e.status == ElectionStatus::Ended => {
                        assert_eq!(result, Err(Ok(VoteError::ElectionEnded)));
                    }
                    Some(_) if voted_before => {
                        assert_eq!(result, Err(Ok(VoteError::AlreadyVoted)));
                    }
                    Some(_) => {}
                }
                if result.is_ok() {
                    assert!(client.has_voted(&id, who));
                }
            }
            FuzzAction::EndElection { election, by_owner } => {
                let id = pick(election);
                let record = client.get_election(&id);
                let result = client.try_end_election(&admin(by_owner), &id);

                match record {
                    _ if !by_owner => assert_eq!(result, Err(Ok(VoteError::Unauthorized))),
                    None => assert_eq!(result, Err(Ok(VoteError::ElectionNotFound))),
                    Some(e) if e.status == ElectionStatus::Ended => {
                        assert_eq!(result, Err(Ok(VoteError::ElectionEnded)));
                    }
                    Some(_) => {
                        assert_eq!(result, Ok(Ok(())));
                        let ended = client.get_election(&id).map(|e| e.status);
                        assert_eq!(ended, Some(ElectionStatus::Ended));
                    }
                }
            }
            FuzzAction::AdvanceLedger { delta } => {
                let seq = env.ledger().sequence().saturating_add(delta as u32);
                env.ledger().set_sequence_number(seq);
            }
        }

        // ── Post-action invariant checks ──
        for id in 0..client.get_election_count() {
            let record = client
                .get_election(&id)
                .expect("INVARIANT VIOLATION: id below counter has no record");
            assert_eq!(record.id, id);

            let results = client.get_results(&id);
            let sum: u64 = results.iter().map(|c| c.vote_count).sum();
            assert_eq!(
                record.total_votes, sum,
                "INVARIANT VIOLATION: total_votes != sum of tallies"
            );

            let ballots = voters
                .iter()
                .filter_map(|v| client.get_ballot(&id, v))
                .inspect(|b| {
                    assert!(
                        results.iter().any(|c| c.id == b.candidate_id),
                        "INVARIANT VIOLATION: ballot names unknown candidate"
                    );
                })
                .count() as u64;
            // Only pool voters can vote, so the pool holds every ballot.
            assert_eq!(ballots, sum, "INVARIANT VIOLATION: ballots != tally");

            if let Some(prev) = totals_before.get(id as usize) {
                assert!(record.total_votes >= *prev, "INVARIANT VIOLATION: tally shrank");
                assert!(record.total_votes <= *prev + 1, "INVARIANT VIOLATION: two votes in one step");
            }
        }
    }
});
