//! Application state container.
//!
//! All fetched data lives in [`StoreState`] and changes only through
//! [`Store::dispatch`]. Views read the state by reference and learn about
//! loading transitions through a [`StatusSubscription`].

use crate::catalog::WalletSnapshot;
use crate::types::{TxIntent, Vault, WalletToken};
use ethers::types::{Address, U256};
use std::sync::mpsc::{self, Receiver, Sender};

/// Resources whose loading status is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Vaults,
    Tokens,
}

/// Emitted to subscribers whenever a resource's `loading` flag flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub resource: Resource,
    pub loading: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStatus {
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VaultsState {
    pub items: Vec<Vault>,
    pub selected: Option<Address>,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, Default)]
pub struct TokensState {
    pub wallet: Option<Address>,
    pub items: Vec<WalletToken>,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub vaults: VaultsState,
    pub tokens: TokensState,
    /// Transactions staged from the deposit/withdraw forms, oldest first
    pub staged: Vec<TxIntent>,
}

#[derive(Debug, Clone)]
pub enum StoreAction {
    VaultsFetchStarted,
    VaultsFetched(Result<Vec<Vault>, String>),
    TokensFetchStarted,
    TokensFetched(Result<WalletSnapshot, String>),
    SelectVault(Option<Address>),
    StageTransaction(TxIntent),
}

impl StoreAction {
    pub fn name(&self) -> &'static str {
        match self {
            StoreAction::VaultsFetchStarted => "vaults/fetch_started",
            StoreAction::VaultsFetched(Ok(_)) => "vaults/fetched",
            StoreAction::VaultsFetched(Err(_)) => "vaults/fetch_failed",
            StoreAction::TokensFetchStarted => "tokens/fetch_started",
            StoreAction::TokensFetched(Ok(_)) => "tokens/fetched",
            StoreAction::TokensFetched(Err(_)) => "tokens/fetch_failed",
            StoreAction::SelectVault(_) => "vaults/select",
            StoreAction::StageTransaction(_) => "transactions/stage",
        }
    }
}

/// Apply one action to the state.
pub fn reduce(state: &mut StoreState, action: StoreAction) {
    match action {
        StoreAction::VaultsFetchStarted => {
            state.vaults.status = LoadStatus {
                loading: true,
                error: None,
            };
        }
        StoreAction::VaultsFetched(Ok(vaults)) => {
            state.vaults.items = vaults;
            state.vaults.status = LoadStatus::default();
        }
        StoreAction::VaultsFetched(Err(error)) => {
            // keep the previous items so a failed refresh does not blank the list
            state.vaults.status = LoadStatus {
                loading: false,
                error: Some(error),
            };
        }
        StoreAction::TokensFetchStarted => {
            state.tokens.status = LoadStatus {
                loading: true,
                error: None,
            };
        }
        StoreAction::TokensFetched(Ok(wallet)) => {
            state.tokens.wallet = wallet.address;
            state.tokens.items = wallet.tokens;
            state.tokens.status = LoadStatus::default();
        }
        StoreAction::TokensFetched(Err(error)) => {
            state.tokens.status = LoadStatus {
                loading: false,
                error: Some(error),
            };
        }
        StoreAction::SelectVault(address) => {
            state.vaults.selected = address;
        }
        StoreAction::StageTransaction(intent) => {
            state.staged.push(intent);
        }
    }
}

/// Receiving end of a status subscription, drained on the UI thread.
pub struct StatusSubscription {
    receiver: Receiver<StatusChange>,
}

impl StatusSubscription {
    /// Take every change queued since the last call, in dispatch order
    pub fn drain(&self) -> Vec<StatusChange> {
        self.receiver.try_iter().collect()
    }
}

#[derive(Default)]
pub struct Store {
    state: StoreState,
    subscribers: Vec<Sender<StatusChange>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn subscribe(&mut self) -> StatusSubscription {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        StatusSubscription { receiver: rx }
    }

    /// Number of live subscriptions, as of the last dispatch
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn dispatch(&mut self, action: StoreAction) {
        tracing::debug!(action = action.name(), "store dispatch");
        let vaults_before = self.state.vaults.status.loading;
        let tokens_before = self.state.tokens.status.loading;

        reduce(&mut self.state, action);

        let mut changes = Vec::with_capacity(2);
        if self.state.vaults.status.loading != vaults_before {
            changes.push(StatusChange {
                resource: Resource::Vaults,
                loading: self.state.vaults.status.loading,
            });
        }
        if self.state.tokens.status.loading != tokens_before {
            changes.push(StatusChange {
                resource: Resource::Tokens,
                loading: self.state.tokens.status.loading,
            });
        }
        if changes.is_empty() {
            return;
        }

        // dropped subscriptions are pruned on the first failed send
        self.subscribers
            .retain(|tx| changes.iter().all(|change| tx.send(*change).is_ok()));
    }
}

pub fn select_selected_vault(state: &StoreState) -> Option<&Vault> {
    let selected = state.vaults.selected?;
    state.vaults.items.iter().find(|v| v.address == selected)
}

pub fn select_vaults_status(state: &StoreState) -> &LoadStatus {
    &state.vaults.status
}

pub fn select_wallet_tokens_status(state: &StoreState) -> &LoadStatus {
    &state.tokens.status
}

/// Wallet balance of `token`, zero when the wallet does not hold it
pub fn select_wallet_balance(state: &StoreState, token: Address) -> U256 {
    state
        .tokens
        .items
        .iter()
        .find(|t| t.token_address == token)
        .map(|t| t.balance)
        .unwrap_or_default()
}
