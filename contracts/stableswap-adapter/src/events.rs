use soroban_sdk::{symbol_short, Address, Env, Symbol};

const ADAPTER: Symbol = symbol_short!("adapter");

#[allow(deprecated)]
pub(crate) fn initialized(e: &Env, pool: &Address) {
    e.events()
        .publish((ADAPTER, symbol_short!("init")), pool.clone());
}

#[allow(deprecated)]
pub(crate) fn allowances_renewed(e: &Env, pool: &Address, expiration_ledger: u32) {
    e.events().publish(
        (ADAPTER, symbol_short!("renew")),
        (pool.clone(), expiration_ledger),
    );
}

/// Logical swap receipt: what went in, what came out and who got it.
#[allow(deprecated)]
pub(crate) fn swapped(
    e: &Env,
    token_in: &Address,
    token_out: &Address,
    amount_in: i128,
    amount_out: i128,
    recipient: &Address,
) {
    e.events().publish(
        (ADAPTER, symbol_short!("swap"), token_in.clone(), token_out.clone()),
        (amount_in, amount_out, recipient.clone()),
    );
}
