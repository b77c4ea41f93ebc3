#![no_std]

//! # Stellar Vote
//!
//! An election registry contract. A single owner (the election authority)
//! creates elections, adds candidates and registers eligible voters; each
//! voter casts at most one vote per election; the owner closes voting.
//!
//! - **Lifecycle**: `Active → Ended`, irreversible. Only `end_election`
//!   moves an election forward.
//! - **Exactly-once voting**: a ballot record per `(election, voter)` is the
//!   sole source of truth for "has voted".
//! - **Dense ids**: elections are numbered 0, 1, 2, … in creation order.
//! - **Policy**: registration enforcement and post-end freezing are
//!   owner-configurable (see [`policy::ElectionPolicy`]). Each election
//!   keeps the policy in force at its creation.
//!
//! Every entry point performs all of its checks before its first write, so a
//! rejected call leaves storage untouched.

pub mod ballot;
pub mod election;
pub mod events;
pub mod policy;

use soroban_sdk::{
    contract, contracterror, contractimpl, log, symbol_short, Address, Env, String, Symbol, Vec,
};

use ballot::BallotRecord;
use election::{Candidate, CandidateView, Election, ElectionStatus};
use policy::{ElectionPolicy, MAX_CANDIDATES};

// ── Storage key constants ─────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const INITIALIZED: Symbol = symbol_short!("INIT");

// ── Error codes ───────────────────────────────────────────────────────────────

/// Errors returned by the registry.
///
/// Codes 100–102 are part of the public contract and must not change.
///
/// | Range   | Purpose                        |
/// |---------|--------------------------------|
/// | 1 – 9   | Initialisation                 |
/// | 100+    | Election registry              |
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VoteError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 100,
    AlreadyVoted = 101,
    ElectionEnded = 102,
    ElectionNotFound = 103,
    CandidateNotFound = 104,
    CandidateExists = 105,
    NotRegistered = 106,
    InvalidInput = 107,
    CandidateLimitReached = 108,
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct StellarVoteContract;

#[contractimpl]
impl StellarVoteContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Bootstrap the registry with its election authority.
    pub fn initialize(env: Env, owner: Address, policy: ElectionPolicy) -> Result<(), VoteError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(VoteError::AlreadyInitialized);
        }
        owner.require_auth();

        env.storage().instance().set(&OWNER, &owner);
        policy::store(&env, &policy);
        env.storage().instance().set(&INITIALIZED, &true);

        Ok(())
    }

    /// Replace the registry policy. Only elections created afterwards pick it
    /// up; existing elections keep the policy they were created under.
    pub fn set_policy(env: Env, caller: Address, policy: ElectionPolicy) -> Result<(), VoteError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        policy::store(&env, &policy);
        events::publish_policy_updated(&env, &policy);
        Ok(())
    }

    // ── Election administration ───────────────────────────────────────────────

    /// Create a new Active election and return its id.
    ///
    /// `duration` is the advisory voting window in ledgers and must be
    /// non-zero. A rejected call does not consume an id.
    pub fn create_election(
        env: Env,
        caller: Address,
        title: String,
        description: String,
        duration: u32,
    ) -> Result<u64, VoteError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if !policy::valid_title(&title) || !policy::valid_description(&description) {
            return Err(VoteError::InvalidInput);
        }
        if duration == 0 {
            return Err(VoteError::InvalidInput);
        }

        let now = env.ledger().sequence();
        let id = election::next_id(&env);
        let record = Election {
            id,
            title,
            description,
            duration,
            status: ElectionStatus::Active,
            created_at: now,
            closes_at: now.saturating_add(duration),
            ended_at: 0,
            candidate_ids: Vec::new(&env),
            total_votes: 0,
            registered_count: 0,
            policy: policy::load(&env),
        };

        election::store(&env, &record);
        events::publish_election_created(&env, &record);

        Ok(id)
    }

    /// Add a candidate under a caller-chosen id, unique within the election.
    pub fn add_candidate(
        env: Env,
        caller: Address,
        election_id: u64,
        candidate_id: u64,
        name: String,
    ) -> Result<(), VoteError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let mut record = election::load(&env, election_id).ok_or(VoteError::ElectionNotFound)?;
        Self::require_open_for_admin(&record)?;

        if !policy::valid_name(&name) {
            return Err(VoteError::InvalidInput);
        }
        if election::has_candidate(&env, election_id, candidate_id) {
            return Err(VoteError::CandidateExists);
        }
        if record.candidate_ids.len() >= MAX_CANDIDATES {
            return Err(VoteError::CandidateLimitReached);
        }

        let candidate = Candidate {
            id: candidate_id,
            name,
            vote_count: 0,
        };
        election::store_candidate(&env, election_id, &candidate);
        record.candidate_ids.push_back(candidate_id);
        election::store(&env, &record);

        events::publish_candidate_added(&env, election_id, &candidate);
        Ok(())
    }

    /// Put `voter` on the election's allow-list. Re-registering is a no-op.
    pub fn register_voter(
        env: Env,
        caller: Address,
        election_id: u64,
        voter: Address,
    ) -> Result<(), VoteError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let mut record = election::load(&env, election_id).ok_or(VoteError::ElectionNotFound)?;
        Self::require_open_for_admin(&record)?;

        if ballot::is_registered(&env, election_id, &voter) {
            return Ok(());
        }

        ballot::register(&env, election_id, &voter);
        record.registered_count = record.registered_count.saturating_add(1);
        election::store(&env, &record);

        events::publish_voter_registered(&env, election_id, &voter);
        Ok(())
    }

    /// Close voting. Ending an already-ended election is rejected.
    pub fn end_election(env: Env, caller: Address, election_id: u64) -> Result<(), VoteError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        let mut record = election::load(&env, election_id).ok_or(VoteError::ElectionNotFound)?;
        if !record.is_active() {
            return Err(VoteError::ElectionEnded);
        }

        record.status = ElectionStatus::Ended;
        record.ended_at = env.ledger().sequence();
        election::store(&env, &record);

        events::publish_election_ended(&env, &record);
        Ok(())
    }

    // ── Voting ────────────────────────────────────────────────────────────────

    /// Cast `voter`'s single vote for `candidate_id`.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// election exists → election active → not yet voted → registered
    /// (when required by policy) → candidate exists.
    pub fn cast_vote(
        env: Env,
        voter: Address,
        election_id: u64,
        candidate_id: u64,
    ) -> Result<(), VoteError> {
        Self::require_initialized(&env)?;
        voter.require_auth();

        let mut record = election::load(&env, election_id).ok_or(VoteError::ElectionNotFound)?;
        if !record.is_active() {
            log!(&env, "vote rejected: election ended", election_id);
            return Err(VoteError::ElectionEnded);
        }
        if ballot::has_voted(&env, election_id, &voter) {
            log!(&env, "vote rejected: already voted", election_id, voter);
            return Err(VoteError::AlreadyVoted);
        }
        if record.policy.require_registration
            && !ballot::is_registered(&env, election_id, &voter)
        {
            log!(&env, "vote rejected: not registered", election_id, voter);
            return Err(VoteError::NotRegistered);
        }
        let mut candidate = election::load_candidate(&env, election_id, candidate_id)
            .ok_or(VoteError::CandidateNotFound)?;

        candidate.vote_count += 1;
        record.total_votes += 1;

        election::store_candidate(&env, election_id, &candidate);
        election::store(&env, &record);
        ballot::store_ballot(
            &env,
            election_id,
            &voter,
            &BallotRecord {
                candidate_id,
                cast_at: env.ledger().sequence(),
            },
        );

        events::publish_vote_cast(&env, election_id, &voter, &candidate);
        Ok(())
    }

    // ── View functions ────────────────────────────────────────────────────────

    pub fn get_candidate_info(env: Env, election_id: u64, candidate_id: u64) -> Option<CandidateView> {
        election::load_candidate(&env, election_id, candidate_id).map(CandidateView::from)
    }

    pub fn get_election(env: Env, election_id: u64) -> Option<Election> {
        election::load(&env, election_id)
    }

    pub fn get_election_count(env: Env) -> u64 {
        election::election_count(&env)
    }

    /// Full tally of an election in candidate insertion order. Empty for an
    /// unknown election.
    pub fn get_results(env: Env, election_id: u64) -> Vec<Candidate> {
        match election::load(&env, election_id) {
            Some(record) => election::load_candidates(&env, &record),
            None => Vec::new(&env),
        }
    }

    pub fn is_registered(env: Env, election_id: u64, voter: Address) -> bool {
        ballot::is_registered(&env, election_id, &voter)
    }

    pub fn has_voted(env: Env, election_id: u64, voter: Address) -> bool {
        ballot::has_voted(&env, election_id, &voter)
    }

    pub fn get_ballot(env: Env, election_id: u64, voter: Address) -> Option<BallotRecord> {
        ballot::load_ballot(&env, election_id, &voter)
    }

    pub fn get_owner(env: Env) -> Result<Address, VoteError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(VoteError::NotInitialized)
    }

    pub fn get_policy(env: Env) -> Result<ElectionPolicy, VoteError> {
        Self::require_initialized(&env)?;
        Ok(policy::load(&env))
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), VoteError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(VoteError::NotInitialized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), VoteError> {
        let owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(VoteError::NotInitialized)?;
        if *caller != owner {
            log!(env, "unauthorized caller", caller.clone());
            return Err(VoteError::Unauthorized);
        }
        Ok(())
    }

    /// Administrative mutations on an ended election are refused when the
    /// election's policy freezes it.
    fn require_open_for_admin(record: &Election) -> Result<(), VoteError> {
        if !record.is_active() && record.policy.freeze_after_end {
            return Err(VoteError::ElectionEnded);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
