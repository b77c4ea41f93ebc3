//! # Stellar Vote Contract Testing Framework
//!
//! A reusable harness for the election registry supporting property-based
//! testing, invariant checking, state exploration, and a declarative
//! scenario DSL.
//!
//! ## Architecture
//!
//! ```text
//! test/framework/
//! ├── mod.rs             Core TestEnv, election harness, snapshots
//! ├── generators.rs      Property-based value and action generators
//! ├── invariants.rs      State and transition invariants
//! ├── state_explorer.rs  Action-sequence exploration with coverage
//! └── scenario_dsl.rs    Given-When-Then scenario builder
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use test_framework::{ElectionTestHarness, TestEnv};
//!
//! let env = TestEnv::new();
//! let harness = ElectionTestHarness::new(&env);
//! let id = harness.create_election("Board");
//! harness.add_candidate(id, 1, "Alice");
//! ```

extern crate std;


use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Env, String,
};
use stellar_vote::{
    election::ElectionStatus, policy::ElectionPolicy, StellarVoteContract,
    StellarVoteContractClient,
};

// ── Core Test Environment ────────────────────────────────────────────────────

/// Wraps the Soroban `Env` with address management and ledger control.
pub struct TestEnv {
    pub env: Env,
}

impl TestEnv {
    /// Create a new test environment with all auth mocked.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        Self { env }
    }

    /// Generate a fresh Soroban address.
    pub fn generate_address(&self) -> Address {
        Address::generate(&self.env)
    }

    /// Generate `n` distinct addresses.
    pub fn generate_addresses(&self, n: usize) -> std::vec::Vec<Address> {
        (0..n).map(|_| self.generate_address()).collect()
    }

    /// Close the current ledger and open the next one.
    pub fn advance_ledger(&self, delta: u32) {
        let current = self.env.ledger().sequence();
        self.env
            .ledger()
            .set_sequence_number(current.saturating_add(delta));
    }

    /// Current ledger sequence.
    pub fn ledger(&self) -> u32 {
        self.env.ledger().sequence()
    }

    /// Build a Soroban string from a Rust `&str`.
    pub fn text(&self, s: &str) -> String {
        String::from_str(&self.env, s)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ── Election Harness ─────────────────────────────────────────────────────────

/// Pre-wired election registry fixture, initialised with an owner.
pub struct ElectionTestHarness<'a> {
    pub env: &'a TestEnv,
    pub client: StellarVoteContractClient<'static>,
    pub contract_id: Address,
    pub owner: Address,
}

impl<'a> ElectionTestHarness<'a> {
    /// Deploy the registry with the default policy.
    pub fn new(env: &'a TestEnv) -> Self {
        Self::with_policy(env, ElectionPolicy::default_policy())
    }

    /// Deploy the registry with an explicit policy.
    pub fn with_policy(env: &'a TestEnv, policy: ElectionPolicy) -> Self {
        let contract_id = env.env.register(StellarVoteContract, ());
        let client = StellarVoteContractClient::new(&env.env, &contract_id);
        let owner = env.generate_address();
        client.initialize(&owner, &policy);
        Self {
            env,
            client,
            contract_id,
            owner,
        }
    }

    /// Create an election as the owner with a fixed description and window.
    pub fn create_election(&self, title: &str) -> u64 {
        self.client.create_election(
            &self.owner,
            &self.env.text(title),
            &self.env.text("generated by the test harness"),
            &100,
        )
    }

    pub fn add_candidate(&self, election_id: u64, candidate_id: u64, name: &str) {
        self.client
            .add_candidate(&self.owner, &election_id, &candidate_id, &self.env.text(name));
    }

    pub fn register_voter(&self, election_id: u64, voter: &Address) {
        self.client.register_voter(&self.owner, &election_id, voter);
    }

    /// Generate a voter and put it on the allow-list of `election_id`.
    pub fn create_voter(&self, election_id: u64) -> Address {
        let voter = self.env.generate_address();
        self.register_voter(election_id, &voter);
        voter
    }

    pub fn cast_vote(&self, voter: &Address, election_id: u64, candidate_id: u64) {
        self.client.cast_vote(voter, &election_id, &candidate_id);
    }

    pub fn end_election(&self, election_id: u64) {
        self.client.end_election(&self.owner, &election_id);
    }

    /// Replace the registry policy as the owner.
    pub fn set_policy(&self, policy: &ElectionPolicy) {
        self.client.set_policy(&self.owner, policy);
    }

    /// Current tally of a candidate, 0 when absent.
    pub fn vote_count(&self, election_id: u64, candidate_id: u64) -> u64 {
        self.client
            .get_candidate_info(&election_id, &candidate_id)
            .map(|c| c.vote_count)
            .unwrap_or(0)
    }

    pub fn election_count(&self) -> u64 {
        self.client.get_election_count()
    }

    /// Snapshot of every election plus the registration and ballot state of
    /// the tracked `voters`.
    pub fn snapshot(&self, voters: &[Address]) -> ElectionSnapshot {
        let election_count = self.election_count();

        let mut elections = std::vec::Vec::new();
        for id in 0..election_count {
            let Some(record) = self.client.get_election(&id) else {
                elections.push(ElectionState::missing(id));
                continue;
            };

            let candidates = self
                .client
                .get_results(&id)
                .iter()
                .map(|c| (c.id, c.vote_count))
                .collect();

            let voter_states = voters
                .iter()
                .map(|v| VoterState {
                    voter: v.clone(),
                    registered: self.client.is_registered(&id, v),
                    ballot: self.client.get_ballot(&id, v).map(|b| b.candidate_id),
                })
                .collect();

            elections.push(ElectionState {
                id,
                stored_id: Some(record.id),
                ended: matches!(record.status, ElectionStatus::Ended),
                require_registration: record.policy.require_registration,
                total_votes: record.total_votes,
                candidates,
                voters: voter_states,
            });
        }

        ElectionSnapshot {
            ledger: self.env.ledger(),
            election_count,
            elections,
        }
    }
}

/// Per-voter view of one election.
#[derive(Debug, Clone)]
pub struct VoterState {
    pub voter: Address,
    pub registered: bool,
    /// Candidate the voter chose, if a ballot exists.
    pub ballot: Option<u64>,
}

/// Observable state of one election.
#[derive(Debug, Clone)]
pub struct ElectionState {
    /// Id the election was queried under.
    pub id: u64,
    /// Id stored in the record, `None` if the record is missing.
    pub stored_id: Option<u64>,
    pub ended: bool,
    /// Registration enforcement the election was created under.
    pub require_registration: bool,
    pub total_votes: u64,
    /// `(candidate_id, vote_count)` in insertion order.
    pub candidates: std::vec::Vec<(u64, u64)>,
    pub voters: std::vec::Vec<VoterState>,
}

impl ElectionState {
    fn missing(id: u64) -> Self {
        Self {
            id,
            stored_id: None,
            ended: false,
            require_registration: false,
            total_votes: 0,
            candidates: std::vec::Vec::new(),
            voters: std::vec::Vec::new(),
        }
    }

    /// Sum of all candidate tallies.
    pub fn sum_vote_counts(&self) -> u64 {
        self.candidates.iter().map(|(_, n)| n).sum()
    }

    /// Number of tracked voters holding a ballot naming `candidate_id`.
    pub fn ballots_for(&self, candidate_id: u64) -> u64 {
        self.voters
            .iter()
            .filter(|v| v.ballot == Some(candidate_id))
            .count() as u64
    }

    /// Number of tracked voters holding any ballot.
    pub fn ballot_count(&self) -> u64 {
        self.voters.iter().filter(|v| v.ballot.is_some()).count() as u64
    }

    pub fn vote_count(&self, candidate_id: u64) -> Option<u64> {
        self.candidates
            .iter()
            .find(|(id, _)| *id == candidate_id)
            .map(|(_, n)| *n)
    }
}

/// Immutable snapshot of registry state, used by invariant checkers and the
/// state explorer.
#[derive(Debug, Clone)]
pub struct ElectionSnapshot {
    pub ledger: u32,
    pub election_count: u64,
    pub elections: std::vec::Vec<ElectionState>,
}

impl ElectionSnapshot {
    pub fn election(&self, id: u64) -> Option<&ElectionState> {
        self.elections.iter().find(|e| e.id == id)
    }
}

// ── Test Outcome Tracking ────────────────────────────────────────────────────

/// Result of a single test action, used by the state explorer and scenario DSL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action succeeded.
    Ok,
    /// The contract rejected the action with this error code.
    ExpectedError(u32),
    /// The action failed outside the contract's error taxonomy.
    UnexpectedError(std::string::String),
}

/// Summary of a test run with coverage metrics.
#[derive(Debug, Clone)]
pub struct TestRunSummary {
    pub actions_executed: usize,
    pub actions_accepted: usize,
    pub invariant_checks: usize,
    pub invariant_violations: std::vec::Vec<std::string::String>,
    pub entry_points_hit: std::collections::HashSet<std::string::String>,
    /// Distinct error codes the contract returned during the run.
    pub error_codes_seen: std::collections::BTreeSet<u32>,
}

impl TestRunSummary {
    pub fn new() -> Self {
        Self {
            actions_executed: 0,
            actions_accepted: 0,
            invariant_checks: 0,
            invariant_violations: std::vec::Vec::new(),
            entry_points_hit: std::collections::HashSet::new(),
            error_codes_seen: std::collections::BTreeSet::new(),
        }
    }

    /// True when no invariant violations were detected.
    pub fn passed(&self) -> bool {
        self.invariant_violations.is_empty()
    }

    /// Coverage ratio: entry points hit / total known entry points.
    pub fn entry_point_coverage(&self, total_entry_points: usize) -> f64 {
        if total_entry_points == 0 {
            return 0.0;
        }
        self.entry_points_hit.len() as f64 / total_entry_points as f64
    }
}

impl Default for TestRunSummary {
    fn default() -> Self {
        Self::new()
    }
}
