//! Events emitted by the election registry.
//!
//! Every accepted mutation publishes one event under the topic pair
//! `("VOTE", <name>)`. Rejected calls publish nothing.

#![allow(deprecated)] // events().publish, pending the #[contractevent] migration

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

use crate::election::{Candidate, Election};
use crate::policy::ElectionPolicy;

fn emit<T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>>(env: &Env, topic: &str, data: T) {
    env.events()
        .publish((symbol_short!("VOTE"), Symbol::new(env, topic)), data);
}

// ── Event payloads ────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElectionCreatedEvent {
    pub election_id: u64,
    pub title: String,
    pub duration: u32,
    pub created_at: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateAddedEvent {
    pub election_id: u64,
    pub candidate_id: u64,
    pub name: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoterRegisteredEvent {
    pub election_id: u64,
    pub voter: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCastEvent {
    pub election_id: u64,
    pub candidate_id: u64,
    pub voter: Address,
    /// Candidate tally after this vote.
    pub vote_count: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElectionEndedEvent {
    pub election_id: u64,
    pub total_votes: u64,
    pub ended_at: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyUpdatedEvent {
    pub require_registration: bool,
    pub freeze_after_end: bool,
}

// ── Publishers ────────────────────────────────────────────────────────────────

pub fn publish_election_created(env: &Env, election: &Election) {
    emit(
        env,
        "elec_created",
        ElectionCreatedEvent {
            election_id: election.id,
            title: election.title.clone(),
            duration: election.duration,
            created_at: election.created_at,
        },
    );
}

pub fn publish_candidate_added(env: &Env, election_id: u64, candidate: &Candidate) {
    emit(
        env,
        "cand_added",
        CandidateAddedEvent {
            election_id,
            candidate_id: candidate.id,
            name: candidate.name.clone(),
        },
    );
}

pub fn publish_voter_registered(env: &Env, election_id: u64, voter: &Address) {
    emit(
        env,
        "voter_reg",
        VoterRegisteredEvent {
            election_id,
            voter: voter.clone(),
        },
    );
}

pub fn publish_vote_cast(env: &Env, election_id: u64, voter: &Address, candidate: &Candidate) {
    emit(
        env,
        "vote_cast",
        VoteCastEvent {
            election_id,
            candidate_id: candidate.id,
            voter: voter.clone(),
            vote_count: candidate.vote_count,
        },
    );
}

pub fn publish_election_ended(env: &Env, election: &Election) {
    emit(
        env,
        "elec_ended",
        ElectionEndedEvent {
            election_id: election.id,
            total_votes: election.total_votes,
            ended_at: election.ended_at,
        },
    );
}

pub fn publish_policy_updated(env: &Env, policy: &ElectionPolicy) {
    emit(
        env,
        "policy_set",
        PolicyUpdatedEvent {
            require_registration: policy.require_registration,
            freeze_after_end: policy.freeze_after_end,
        },
    );
}
