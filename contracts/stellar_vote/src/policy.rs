//! Registry configuration: the owner-tunable policy switches and the fixed
//! input limits.

use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol};

const POLICY: Symbol = symbol_short!("POLICY");

/// Maximum title length in bytes.
pub const MAX_TITLE_LEN: u32 = 64;
/// Maximum description length in bytes.
pub const MAX_DESCRIPTION_LEN: u32 = 256;
/// Maximum candidate name length in bytes.
pub const MAX_NAME_LEN: u32 = 64;
/// Maximum number of candidates a single election may hold.
pub const MAX_CANDIDATES: u32 = 64;

/// Behavioural switches applied to every election in the registry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElectionPolicy {
    /// `cast_vote` rejects voters absent from the election's allow-list.
    pub require_registration: bool,
    /// `add_candidate` and `register_voter` reject ended elections.
    pub freeze_after_end: bool,
}

impl ElectionPolicy {
    pub fn default_policy() -> Self {
        ElectionPolicy {
            require_registration: true,
            freeze_after_end: true,
        }
    }
}

pub(crate) fn store(env: &Env, policy: &ElectionPolicy) {
    env.storage().instance().set(&POLICY, policy);
}

pub(crate) fn load(env: &Env) -> ElectionPolicy {
    env.storage()
        .instance()
        .get(&POLICY)
        .unwrap_or_else(ElectionPolicy::default_policy)
}

/// Title must be non-empty and at most `MAX_TITLE_LEN` bytes.
pub fn valid_title(title: &String) -> bool {
    title.len() > 0 && title.len() <= MAX_TITLE_LEN
}

pub fn valid_description(description: &String) -> bool {
    description.len() <= MAX_DESCRIPTION_LEN
}

pub fn valid_name(name: &String) -> bool {
    name.len() > 0 && name.len() <= MAX_NAME_LEN
}
