use soroban_sdk::{contractclient, Address, Env};

/// Three-asset stable-swap pool.
///
/// `exchange` pulls `dx` of coin `i` from `sender` with `transfer_from`, so
/// the sender must have approved the pool beforehand. It fails atomically when
/// the output would be below `min_dy`.
#[contractclient(name = "StableSwapPoolClient")]
#[allow(dead_code)]
pub trait StableSwapPoolTrait {
    fn get_dy(e: Env, i: u32, j: u32, dx: i128) -> i128;

    fn exchange(e: Env, sender: Address, i: u32, j: u32, dx: i128, min_dy: i128) -> i128;

    /// Fee rate with 1e10 precision
    fn fee(e: Env) -> u64;
}
