//! Election and candidate records, plus their storage helpers.

use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol, Vec};

use crate::policy::ElectionPolicy;

// ── Storage keys ──────────────────────────────────────────────────────────────

pub(crate) const ELECTION_CTR: Symbol = symbol_short!("ELEC_CTR");

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// Persistent storage keys for per-election data.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Election(u64),
    Candidate(u64, u64),
}

// ── Types ─────────────────────────────────────────────────────────────────────

/// Lifecycle status of an election.
///
/// ```text
/// Active ──end_election(owner)──► Ended
/// ```
///
/// `Ended` is terminal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ElectionStatus {
    Active,
    Ended,
}

/// The on-chain election record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Election {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Advisory voting window in ledgers. Voting only closes through
    /// `end_election`.
    pub duration: u32,
    pub status: ElectionStatus,
    /// Ledger sequence at creation.
    pub created_at: u32,
    /// `created_at + duration`, saturating.
    pub closes_at: u32,
    /// Ledger sequence at which the election was ended, 0 while active.
    pub ended_at: u32,
    /// Candidate ids in insertion order.
    pub candidate_ids: Vec<u64>,
    pub total_votes: u64,
    pub registered_count: u32,
    /// Registry policy in force when the election was created. `set_policy`
    /// never rewrites it.
    pub policy: ElectionPolicy,
}

impl Election {
    pub fn is_active(&self) -> bool {
        matches!(self.status, ElectionStatus::Active)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    pub id: u64,
    pub name: String,
    pub vote_count: u64,
}

/// Read-only projection returned by `get_candidate_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CandidateView {
    pub name: String,
    pub vote_count: u64,
}

impl From<Candidate> for CandidateView {
    fn from(c: Candidate) -> Self {
        CandidateView {
            name: c.name,
            vote_count: c.vote_count,
        }
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

/// Number of elections created so far; also the id the next one receives.
pub(crate) fn election_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&ELECTION_CTR)
        .unwrap_or(0u64)
}

/// Hand out the next dense, zero-based election id.
pub(crate) fn next_id(env: &Env) -> u64 {
    let id = election_count(env);
    env.storage().instance().set(&ELECTION_CTR, &(id + 1));
    id
}

pub(crate) fn store(env: &Env, election: &Election) {
    let key = DataKey::Election(election.id);
    env.storage().persistent().set(&key, election);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, id: u64) -> Option<Election> {
    env.storage().persistent().get(&DataKey::Election(id))
}

pub(crate) fn store_candidate(env: &Env, election_id: u64, candidate: &Candidate) {
    let key = DataKey::Candidate(election_id, candidate.id);
    env.storage().persistent().set(&key, candidate);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load_candidate(env: &Env, election_id: u64, candidate_id: u64) -> Option<Candidate> {
    env.storage()
        .persistent()
        .get(&DataKey::Candidate(election_id, candidate_id))
}

pub(crate) fn has_candidate(env: &Env, election_id: u64, candidate_id: u64) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Candidate(election_id, candidate_id))
}

/// All candidates of an election in insertion order.
pub(crate) fn load_candidates(env: &Env, election: &Election) -> Vec<Candidate> {
    let mut out = Vec::new(env);
    for candidate_id in election.candidate_ids.iter() {
        if let Some(candidate) = load_candidate(env, election.id, candidate_id) {
            out.push_back(candidate);
        }
    }
    out
}
