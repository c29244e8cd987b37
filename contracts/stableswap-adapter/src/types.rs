use soroban_sdk::{contracttype, Address, Vec};

/// One asset tradable through the pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenDescriptor {
    /// Token contract address
    pub address: Address,
    /// Position of the asset in the pool's coin list (0, 1 or 2)
    pub pool_index: u32,
    /// Must match the token's own `decimals()`, checked by `initialize`
    pub decimals: u32,
}

/// Immutable deployment configuration, fixed by the constructor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdapterConfig {
    /// Stable-swap pool the trades are routed through
    pub pool: Address,
    /// Stellar Asset Contract of the native asset
    pub native_asset: Address,
    /// Wrapped-native token, convertible 1:1 via deposit/withdraw
    pub wrapped_native: Address,
    pub tokens: Vec<TokenDescriptor>,
}
