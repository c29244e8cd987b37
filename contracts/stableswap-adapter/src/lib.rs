#![no_std]
//! # StableSwap Adapter - Native Asset Gateway to a Three-Asset Pool
//!
//! This contract lets a user trade the chain's native asset for one of the
//! pool's stablecoins, and back, through a third-party stable-swap pool whose
//! coins are the wrapped-native token and two stablecoins.
//!
//! ## Key Characteristics:
//! - Pass-through custody: the adapter holds tokens only inside a single call
//!   and ends every call with a zero balance of every token involved
//! - One-time `initialize` grants the pool an unlimited allowance on the three
//!   pool coins, so the pool can pull the adapter's input with `transfer_from`
//! - Slippage protection is the pool's own `min_dy` check; a failing check
//!   rolls back the whole invocation, including the wrap/unwrap legs
//!
//! ## Token Flow:
//! ```text
//! native -> User -> Adapter (wrap) -> Pool -> Adapter -> Recipient (stablecoin)
//! stablecoin -> User -> Adapter -> Pool -> Adapter (unwrap?) -> Recipient (native or wrapped)
//! ```

use soroban_sdk::{
    auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation},
    contract, contractimpl, log, panic_with_error, token, vec, Address, Env, IntoVal, Symbol,
    Val, Vec,
};

mod error;
mod events;
mod pool;
mod storage;
mod types;
mod wrapped_native;

pub use error::AdapterError;
pub use types::{AdapterConfig, TokenDescriptor};

use pool::StableSwapPoolClient;
use storage::{extend_instance_ttl, get_config, set_config, set_initialized};
use wrapped_native::WrappedNativeClient;

/// Number of coins in the pool
pub const POOL_SIZE: u32 = 3;

/// Validates that the amount is non-negative
pub fn check_nonnegative_amount(amount: i128) -> Result<(), AdapterError> {
    if amount < 0 {
        Err(AdapterError::NegativeNotAllowed)
    } else {
        Ok(())
    }
}

/// The two supported trade directions, with the non-native leg resolved.
enum Route {
    NativeForToken { wrapped: TokenDescriptor, output: TokenDescriptor },
    TokenForNative { input: TokenDescriptor, wrapped: TokenDescriptor },
}

fn validate_config(config: &AdapterConfig) -> Result<(), AdapterError> {
    if config.tokens.len() != POOL_SIZE || config.native_asset == config.wrapped_native {
        return Err(AdapterError::InvalidConfig);
    }
    let mut wrapped_found = false;
    for (position, token) in config.tokens.iter().enumerate() {
        if token.pool_index >= POOL_SIZE {
            return Err(AdapterError::InvalidConfig);
        }
        let duplicated = config.tokens.iter().skip(position + 1).any(|other| {
            other.address == token.address || other.pool_index == token.pool_index
        });
        if duplicated {
            return Err(AdapterError::InvalidConfig);
        }
        wrapped_found |= token.address == config.wrapped_native;
    }
    if !wrapped_found {
        return Err(AdapterError::InvalidConfig);
    }
    Ok(())
}

fn resolve_address(config: &AdapterConfig, token: &Address) -> Result<TokenDescriptor, AdapterError> {
    config
        .tokens
        .iter()
        .find(|descriptor| descriptor.address == *token)
        .ok_or(AdapterError::UnsupportedToken)
}

fn resolve_index(config: &AdapterConfig, index: u32) -> Result<TokenDescriptor, AdapterError> {
    config
        .tokens
        .iter()
        .find(|descriptor| descriptor.pool_index == index)
        .ok_or(AdapterError::UnsupportedToken)
}

/// Picks the trade direction for a resolved pair. Exactly one side must be
/// the wrapped-native token.
fn route(
    config: &AdapterConfig,
    input: TokenDescriptor,
    output: TokenDescriptor,
) -> Result<Route, AdapterError> {
    if input.address == output.address {
        return Err(AdapterError::InvalidToken);
    }
    if input.address == config.wrapped_native {
        Ok(Route::NativeForToken { wrapped: input, output })
    } else if output.address == config.wrapped_native {
        Ok(Route::TokenForNative { input, wrapped: output })
    } else {
        Err(AdapterError::InvalidToken)
    }
}

fn ensure_initialized(e: &Env) -> Result<(), AdapterError> {
    if storage::is_initialized(e) {
        Ok(())
    } else {
        Err(AdapterError::NotInitialized)
    }
}

/// Checks every descriptor's `decimals` against the token contract itself.
fn check_decimals(e: &Env, config: &AdapterConfig) -> Result<(), AdapterError> {
    for descriptor in config.tokens.iter() {
        if token::Client::new(e, &descriptor.address).decimals() != descriptor.decimals {
            return Err(AdapterError::InvalidConfig);
        }
    }
    Ok(())
}

/// Approves the pool for `i128::MAX` of every pool coin held by the adapter.
/// SEP-41 allowances expire, so the approval lives as long as the host allows.
fn approve_pool(e: &Env, config: &AdapterConfig) -> u32 {
    let adapter = e.current_contract_address();
    let expiration_ledger = e.ledger().max_live_until_ledger();
    for descriptor in config.tokens.iter() {
        token::Client::new(e, &descriptor.address).approve(
            &adapter,
            &config.pool,
            &i128::MAX,
            &expiration_ledger,
        );
    }
    expiration_ledger
}

/// Sends the adapter's entire balance of `token` to `recipient`.
fn forward_balance(e: &Env, token: &Address, recipient: &Address) -> i128 {
    let adapter = e.current_contract_address();
    let token_client = token::Client::new(e, token);
    let balance = token_client.balance(&adapter);
    if balance > 0 {
        token_client.transfer(&adapter, recipient, &balance);
    }
    balance
}

/// Converts `amount` of native asset held by the adapter into wrapped-native.
///
/// The wrapper pulls the native asset with a `transfer` whose `from` is the
/// adapter, one level below the adapter's own call, so the adapter has to
/// authorize that transfer explicitly.
fn wrap_native(e: &Env, config: &AdapterConfig, amount: i128) {
    let adapter = e.current_contract_address();

    let mut transfer_args: Vec<Val> = vec![e];
    transfer_args.push_back(adapter.into_val(e)); // From
    transfer_args.push_back(config.wrapped_native.into_val(e)); // To
    transfer_args.push_back(amount.into_val(e)); // Amount

    e.authorize_as_current_contract(vec![
        e,
        InvokerContractAuthEntry::Contract(SubContractInvocation {
            context: ContractContext {
                contract: config.native_asset.clone(),
                fn_name: Symbol::new(e, "transfer"),
                args: transfer_args,
            },
            sub_invocations: vec![e],
        }),
    ]);

    WrappedNativeClient::new(e, &config.wrapped_native).deposit(&adapter, &amount);
}

fn swap_native_for_token(
    e: &Env,
    config: &AdapterConfig,
    caller: &Address,
    wrapped: &TokenDescriptor,
    output: &TokenDescriptor,
    amount_in: i128,
    min_amount_out: i128,
    recipient: &Address,
) -> i128 {
    let adapter = e.current_contract_address();

    // Step 1: take the native payment and wrap it
    token::Client::new(e, &config.native_asset).transfer(caller, &adapter, &amount_in);
    wrap_native(e, config, amount_in);

    // Step 2: trade wrapped-native for the output coin, the pool enforces the minimum
    StableSwapPoolClient::new(e, &config.pool).exchange(
        &adapter,
        &wrapped.pool_index,
        &output.pool_index,
        &amount_in,
        &min_amount_out,
    );

    // Step 3: hand everything received to the recipient
    let amount_out = forward_balance(e, &output.address, recipient);
    log!(e, "native for token settled", amount_in, amount_out);
    events::swapped(
        e,
        &config.native_asset,
        &output.address,
        amount_in,
        amount_out,
        recipient,
    );
    amount_out
}

fn swap_token_for_native(
    e: &Env,
    config: &AdapterConfig,
    caller: &Address,
    input: &TokenDescriptor,
    wrapped: &TokenDescriptor,
    amount_in: i128,
    min_amount_out: i128,
    recipient: &Address,
    unwrap_as_native: bool,
) -> i128 {
    let adapter = e.current_contract_address();

    // Step 1: pull the input coin, the caller must have approved the adapter
    token::Client::new(e, &input.address).transfer_from(&adapter, caller, &adapter, &amount_in);

    // Step 2: trade it for wrapped-native, the pool enforces the minimum
    StableSwapPoolClient::new(e, &config.pool).exchange(
        &adapter,
        &input.pool_index,
        &wrapped.pool_index,
        &amount_in,
        &min_amount_out,
    );

    // Step 3: unwrap if asked, then hand everything received to the recipient
    let (token_out, amount_out) = if unwrap_as_native {
        let received = token::Client::new(e, &config.wrapped_native).balance(&adapter);
        if received > 0 {
            WrappedNativeClient::new(e, &config.wrapped_native).withdraw(&adapter, &received);
        }
        (
            config.native_asset.clone(),
            forward_balance(e, &config.native_asset, recipient),
        )
    } else {
        (
            config.wrapped_native.clone(),
            forward_balance(e, &config.wrapped_native, recipient),
        )
    };
    log!(e, "token for native settled", amount_in, amount_out);
    events::swapped(e, &input.address, &token_out, amount_in, amount_out, recipient);
    amount_out
}

fn execute(
    e: &Env,
    config: &AdapterConfig,
    caller: &Address,
    route: Route,
    amount_in: i128,
    min_amount_out: i128,
    recipient: &Address,
    unwrap_as_native: bool,
) -> i128 {
    match route {
        Route::NativeForToken { wrapped, output } => swap_native_for_token(
            e,
            config,
            caller,
            &wrapped,
            &output,
            amount_in,
            min_amount_out,
            recipient,
        ),
        Route::TokenForNative { input, wrapped } => swap_token_for_native(
            e,
            config,
            caller,
            &input,
            &wrapped,
            amount_in,
            min_amount_out,
            recipient,
            unwrap_as_native,
        ),
    }
}

fn check_swap_amounts(amount_in: i128, min_amount_out: i128) -> Result<(), AdapterError> {
    check_nonnegative_amount(amount_in)?;
    check_nonnegative_amount(min_amount_out)
}

#[contract]
pub struct StableSwapAdapter;

#[contractimpl]
impl StableSwapAdapter {
    /// Store the pool, the native asset and the three pool coins
    ///
    /// ## Parameters:
    /// - `pool`: The stable-swap pool trades are routed through
    /// - `native_asset`: Stellar Asset Contract of the native asset
    /// - `wrapped_native`: Wrapped-native token, must be one of `tokens`
    /// - `tokens`: Exactly three descriptors with distinct addresses and pool indices below 3
    ///
    /// Panics with `InvalidConfig` when the descriptors do not match the pool layout.
    pub fn __constructor(
        e: Env,
        pool: Address,
        native_asset: Address,
        wrapped_native: Address,
        tokens: Vec<TokenDescriptor>,
    ) {
        let config = AdapterConfig {
            pool,
            native_asset,
            wrapped_native,
            tokens,
        };
        if let Err(err) = validate_config(&config) {
            panic_with_error!(&e, err);
        }
        set_config(&e, &config);
        extend_instance_ttl(&e);
    }

    /// Grant the pool an unlimited allowance on all three pool coins
    ///
    /// Runs once per deployment. A second call fails with `AlreadyInitialized`
    /// so misuse is visible to the caller instead of silently costing fees.
    /// This is also the first call that reaches the token contracts, so the
    /// configured `decimals` are checked here and a mismatch is `InvalidConfig`.
    pub fn initialize(e: Env) -> Result<(), AdapterError> {
        if storage::is_initialized(&e) {
            return Err(AdapterError::AlreadyInitialized);
        }
        let config = get_config(&e);
        check_decimals(&e, &config)?;
        approve_pool(&e, &config);
        set_initialized(&e);
        extend_instance_ttl(&e);

        log!(&e, "pool approvals granted", config.pool);
        events::initialized(&e, &config.pool);
        Ok(())
    }

    /// Re-grant the pool approvals with a fresh expiration ledger
    ///
    /// This is the one exception to approvals being granted only by
    /// `initialize`. SEP-41 allowances expire at the ledger chosen when they
    /// were granted, and without a renewal every swap would start failing
    /// inside the pool once that ledger passes. The initialization flag is
    /// left untouched, so `initialize` still fails with `AlreadyInitialized`.
    pub fn renew_allowances(e: Env) -> Result<u32, AdapterError> {
        ensure_initialized(&e)?;
        let config = get_config(&e);
        let expiration_ledger = approve_pool(&e, &config);
        extend_instance_ttl(&e);

        events::allowances_renewed(&e, &config.pool, expiration_ledger);
        Ok(expiration_ledger)
    }

    pub fn is_initialized(e: Env) -> bool {
        storage::is_initialized(&e)
    }

    pub fn get_pool(e: Env) -> Address {
        get_config(&e).pool
    }

    pub fn get_native_asset(e: Env) -> Address {
        get_config(&e).native_asset
    }

    pub fn get_wrapped_native(e: Env) -> Address {
        get_config(&e).wrapped_native
    }

    pub fn get_tokens(e: Env) -> Vec<TokenDescriptor> {
        get_config(&e).tokens
    }

    pub fn get_token(e: Env, token: Address) -> Result<TokenDescriptor, AdapterError> {
        resolve_address(&get_config(&e), &token)
    }

    /// Current pool fee, read through on every call (1e10 precision)
    pub fn get_fee(e: Env) -> u64 {
        StableSwapPoolClient::new(&e, &get_config(&e).pool).fee()
    }

    /// Quote `amount_in` of `token_in` in units of `token_out`
    ///
    /// The quote is the pool's `get_dy` as of now. Another trade can move the
    /// pool before a swap executes, so use it to derive `min_amount_out`
    /// rather than expecting an exact match.
    pub fn get_estimated_amount_out(
        e: Env,
        token_in: Address,
        token_out: Address,
        amount_in: i128,
    ) -> Result<i128, AdapterError> {
        check_nonnegative_amount(amount_in)?;
        let config = get_config(&e);
        let input = resolve_address(&config, &token_in)?;
        let output = resolve_address(&config, &token_out)?;
        Ok(StableSwapPoolClient::new(&e, &config.pool).get_dy(
            &input.pool_index,
            &output.pool_index,
            &amount_in,
        ))
    }

    /// Same as `get_estimated_amount_out` with tokens given by pool index
    pub fn get_estimate_by_index(
        e: Env,
        index_in: u32,
        index_out: u32,
        amount_in: i128,
    ) -> Result<i128, AdapterError> {
        check_nonnegative_amount(amount_in)?;
        let config = get_config(&e);
        let input = resolve_index(&config, index_in)?;
        let output = resolve_index(&config, index_out)?;
        Ok(StableSwapPoolClient::new(&e, &config.pool).get_dy(
            &input.pool_index,
            &output.pool_index,
            &amount_in,
        ))
    }

    /// Swap `amount_in` of the native asset for `token_out`
    ///
    /// ## Parameters:
    /// - `caller`: Pays the native asset (must sign the transaction)
    /// - `token_out`: One of the two stablecoins; the wrapped-native token is `InvalidToken`
    /// - `amount_in`: Native amount to sell
    /// - `min_amount_out`: Slippage guard, enforced by the pool
    /// - `recipient`: Receives the stablecoin
    /// - `unwrap_as_native`: Has no effect in this direction, the output is
    ///   always the stablecoin. Kept so both directions share one signature.
    ///
    /// ## Returns:
    /// Amount of `token_out` sent to `recipient`
    pub fn exchange_exact_native_for_token(
        e: Env,
        caller: Address,
        token_out: Address,
        amount_in: i128,
        min_amount_out: i128,
        recipient: Address,
        unwrap_as_native: bool,
    ) -> Result<i128, AdapterError> {
        caller.require_auth();
        check_swap_amounts(amount_in, min_amount_out)?;
        let config = get_config(&e);

        let input = resolve_address(&config, &config.wrapped_native)?;
        let output = resolve_address(&config, &token_out)?;
        let route = route(&config, input, output)?;
        ensure_initialized(&e)?;

        extend_instance_ttl(&e);
        Ok(execute(
            &e,
            &config,
            &caller,
            route,
            amount_in,
            min_amount_out,
            &recipient,
            unwrap_as_native,
        ))
    }

    /// Swap `amount_in` of `token_in` for the native asset
    ///
    /// ## Parameters:
    /// - `caller`: Sells `token_in` (must sign and have approved the adapter for `amount_in`)
    /// - `token_in`: One of the two stablecoins; the wrapped-native token is `InvalidToken`
    /// - `amount_in`: Amount of `token_in` to sell
    /// - `min_amount_out`: Slippage guard, enforced by the pool
    /// - `recipient`: Receives the proceeds
    /// - `unwrap_as_native`: `true` sends the native asset, `false` sends the wrapped-native token
    ///
    /// ## Returns:
    /// Amount of native (or wrapped-native) asset sent to `recipient`
    pub fn exchange_exact_token_for_native(
        e: Env,
        caller: Address,
        token_in: Address,
        amount_in: i128,
        min_amount_out: i128,
        recipient: Address,
        unwrap_as_native: bool,
    ) -> Result<i128, AdapterError> {
        caller.require_auth();
        check_swap_amounts(amount_in, min_amount_out)?;
        let config = get_config(&e);

        let input = resolve_address(&config, &token_in)?;
        let output = resolve_address(&config, &config.wrapped_native)?;
        let route = route(&config, input, output)?;
        ensure_initialized(&e)?;

        extend_instance_ttl(&e);
        Ok(execute(
            &e,
            &config,
            &caller,
            route,
            amount_in,
            min_amount_out,
            &recipient,
            unwrap_as_native,
        ))
    }

    /// Swap by pool index, dispatching to whichever direction the pair describes
    ///
    /// One of `index_in`/`index_out` must be the wrapped-native coin; a
    /// stablecoin-to-stablecoin pair is `InvalidToken`.
    pub fn exchange_by_index(
        e: Env,
        caller: Address,
        index_in: u32,
        index_out: u32,
        amount_in: i128,
        min_amount_out: i128,
        recipient: Address,
        unwrap_as_native: bool,
    ) -> Result<i128, AdapterError> {
        caller.require_auth();
        check_swap_amounts(amount_in, min_amount_out)?;
        let config = get_config(&e);

        let input = resolve_index(&config, index_in)?;
        let output = resolve_index(&config, index_out)?;
        let route = route(&config, input, output)?;
        ensure_initialized(&e)?;

        extend_instance_ttl(&e);
        Ok(execute(
            &e,
            &config,
            &caller,
            route,
            amount_in,
            min_amount_out,
            &recipient,
            unwrap_as_native,
        ))
    }
}

#[cfg(test)]
mod test;
