use soroban_sdk::{contracttype, Env};

use crate::types::AdapterConfig;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = 3 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;

#[derive(Clone)]
#[contracttype]
enum DataKey {
    Config,
    Initialized,
}

pub fn extend_instance_ttl(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn set_config(e: &Env, config: &AdapterConfig) {
    e.storage().instance().set(&DataKey::Config, config);
}

/// The constructor always stores the config, so a missing entry is unreachable.
pub fn get_config(e: &Env) -> AdapterConfig {
    e.storage().instance().get(&DataKey::Config).unwrap()
}

pub fn set_initialized(e: &Env) {
    e.storage().instance().set(&DataKey::Initialized, &true);
}

pub fn is_initialized(e: &Env) -> bool {
    e.storage()
        .instance()
        .get(&DataKey::Initialized)
        .unwrap_or(false)
}
