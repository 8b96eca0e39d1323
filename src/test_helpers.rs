//! Test helpers for creating mock data

use crate::catalog::{parse_catalog, WalletSnapshot, SAMPLE_CATALOG};
use crate::store::{reduce, StoreAction, StoreState};
use crate::types::Vault;

/// First vault of the bundled catalog (USDC, 6 decimals, 1,250 USDC position)
pub fn sample_vault() -> Vault {
    parse_catalog(SAMPLE_CATALOG).unwrap().vaults.remove(0)
}

/// Wallet of the bundled catalog (5,400 USDC and 1,200 DAI)
pub fn sample_wallet() -> WalletSnapshot {
    parse_catalog(SAMPLE_CATALOG).unwrap().wallet
}

/// Fully loaded state with the sample vault selected
pub fn sample_state() -> StoreState {
    let vault = sample_vault();
    let mut state = StoreState::default();
    reduce(&mut state, StoreAction::SelectVault(Some(vault.address)));
    reduce(&mut state, StoreAction::VaultsFetched(Ok(vec![vault])));
    reduce(&mut state, StoreAction::TokensFetched(Ok(sample_wallet())));
    state
}
