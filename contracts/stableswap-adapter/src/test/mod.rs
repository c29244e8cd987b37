#![cfg(test)]

use soroban_sdk::{
    testutils::{Address as _, Events},
    token::{StellarAssetClient, TokenClient},
    vec, Address, Env, Val, Vec,
};

use crate::{StableSwapAdapter, StableSwapAdapterClient, TokenDescriptor};



use pool::{MockPool, MockPoolClient};
use wrapped_native::{MockWrappedNative, MockWrappedNativeClient};

/// 0.04% with 1e10 precision
pub const POOL_FEE: u64 = 4_000_000;
/// One whole unit of a 7-decimal asset
pub const ONE: i128 = 10_000_000;
pub const POOL_LIQUIDITY: i128 = 1_000_000 * ONE;
pub const USER_BALANCE: i128 = 1_000 * ONE;

pub const WRAPPED_INDEX: u32 = 0;
pub const USDC_INDEX: u32 = 1;
pub const USDT_INDEX: u32 = 2;

pub struct AdapterTest<'a> {
    pub env: Env,
    pub adapter: StableSwapAdapterClient<'a>,
    pub pool: MockPoolClient<'a>,
    pub native: TokenClient<'a>,
    pub wrapped: TokenClient<'a>,
    pub usdc: TokenClient<'a>,
    pub usdt: TokenClient<'a>,
    pub user: Address,
    pub recipient: Address,
}

pub fn create_token_descriptors(
    e: &Env,
    wrapped: &Address,
    usdc: &Address,
    usdt: &Address,
) -> Vec<TokenDescriptor> {
    vec![
        e,
        TokenDescriptor {
            address: wrapped.clone(),
            pool_index: WRAPPED_INDEX,
            decimals: 7,
        },
        TokenDescriptor {
            address: usdc.clone(),
            pool_index: USDC_INDEX,
            decimals: 7,
        },
        TokenDescriptor {
            address: usdt.clone(),
            pool_index: USDT_INDEX,
            decimals: 7,
        },
    ]
}

impl<'a> AdapterTest<'a> {
    /// Deploys the assets, a funded pool and an adapter that is NOT yet initialized.
    fn setup() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let native_id = env.register_stellar_asset_contract_v2(admin.clone()).address();
        let usdc_id = env.register_stellar_asset_contract_v2(admin.clone()).address();
        let usdt_id = env.register_stellar_asset_contract_v2(admin.clone()).address();
        let wrapped_id = env.register(MockWrappedNative, (native_id.clone(),));

        let coins = vec![&env, wrapped_id.clone(), usdc_id.clone(), usdt_id.clone()];
        let pool_id = env.register(MockPool, (coins, POOL_FEE));

        let native = TokenClient::new(&env, &native_id);
        let wrapped = TokenClient::new(&env, &wrapped_id);
        let wrapper = MockWrappedNativeClient::new(&env, &wrapped_id);
        let usdc = TokenClient::new(&env, &usdc_id);
        let usdt = TokenClient::new(&env, &usdt_id);

        // Seed the pool with all three coins
        let provider = Address::generate(&env);
        StellarAssetClient::new(&env, &native_id).mint(&provider, &POOL_LIQUIDITY);
        wrapper.deposit(&provider, &POOL_LIQUIDITY);
        wrapper.transfer(&provider, &pool_id, &POOL_LIQUIDITY);
        StellarAssetClient::new(&env, &usdc_id).mint(&pool_id, &POOL_LIQUIDITY);
        StellarAssetClient::new(&env, &usdt_id).mint(&pool_id, &POOL_LIQUIDITY);

        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &native_id).mint(&user, &USER_BALANCE);
        StellarAssetClient::new(&env, &usdc_id).mint(&user, &USER_BALANCE);
        StellarAssetClient::new(&env, &usdt_id).mint(&user, &USER_BALANCE);
        let recipient = Address::generate(&env);

        let tokens = create_token_descriptors(&env, &wrapped_id, &usdc_id, &usdt_id);
        let adapter_id = env.register(
            StableSwapAdapter,
            (pool_id.clone(), native_id.clone(), wrapped_id.clone(), tokens),
        );
        let adapter = StableSwapAdapterClient::new(&env, &adapter_id);
        let pool = MockPoolClient::new(&env, &pool_id);

        AdapterTest {
            env,
            adapter,
            pool,
            native,
            wrapped,
            usdc,
            usdt,
            user,
            recipient,
        }
    }

    fn setup_initialized() -> Self {
        let test = Self::setup();
        test.adapter.initialize();
        test
    }

    /// The last invocation made the adapter publish exactly this one event.
    /// Must run right after the call under test, any later call resets the log.
    fn assert_adapter_event(&self, topics: Vec<Val>, data: Val) {
        let adapter = &self.adapter.address;
        assert_eq!(
            self.env.events().all().filter_by_contract(adapter),
            vec![&self.env, (adapter.clone(), topics, data)]
        );
    }

    /// The adapter never keeps custody of anything between calls.
    fn assert_no_residual_balance(&self) {
        let adapter = &self.adapter.address;
        assert_eq!(self.native.balance(adapter), 0);
        assert_eq!(self.wrapped.balance(adapter), 0);
        assert_eq!(self.usdc.balance(adapter), 0);
        assert_eq!(self.usdt.balance(adapter), 0);
    }
}
