use soroban_sdk::{contractclient, Address, Env};

/// Conversion half of the wrapped-native token. The token half is the
/// standard SEP-41 interface served at the same address.
#[contractclient(name = "WrappedNativeClient")]
#[allow(dead_code)]
pub trait WrappedNativeTrait {
    /// Moves `amount` of the native asset from `from` into the wrapper and
    /// mints the same amount of wrapped token to `from`.
    fn deposit(e: Env, from: Address, amount: i128);

    /// Burns `amount` of wrapped token held by `from` and sends back the
    /// native asset.
    fn withdraw(e: Env, from: Address, amount: i128);
}
