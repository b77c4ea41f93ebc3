//! Voter registration and ballot records.
//!
//! Both are keyed by `(election_id, voter)`. A registration is written once
//! by the election owner and never removed; a ballot is written at most once,
//! and its presence is what "has voted" means.

use soroban_sdk::{contracttype, Address, Env};

// TTL: ~60 days, matching election records
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

#[contracttype]
#[derive(Clone)]
pub enum BallotKey {
    Registered(u64, Address),
    Voted(u64, Address),
}

/// A cast vote, kept to reject any second attempt.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BallotRecord {
    pub candidate_id: u64,
    /// Ledger sequence at which the vote was accepted.
    pub cast_at: u32,
}

pub(crate) fn register(env: &Env, election_id: u64, voter: &Address) {
    let key = BallotKey::Registered(election_id, voter.clone());
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn is_registered(env: &Env, election_id: u64, voter: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&BallotKey::Registered(election_id, voter.clone()))
}

pub(crate) fn store_ballot(env: &Env, election_id: u64, voter: &Address, record: &BallotRecord) {
    let key = BallotKey::Voted(election_id, voter.clone());
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load_ballot(env: &Env, election_id: u64, voter: &Address) -> Option<BallotRecord> {
    env.storage()
        .persistent()
        .get(&BallotKey::Voted(election_id, voter.clone()))
}

pub(crate) fn has_voted(env: &Env, election_id: u64, voter: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&BallotKey::Voted(election_id, voter.clone()))
}
