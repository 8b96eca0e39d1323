//! Input state and validation behind the deposit and withdraw panels.

use crate::store::{select_wallet_balance, StoreState};
use crate::types::{TxIntent, TxKind, Vault};
use crate::utils::{format_token_amount, format_token_input, parse_token_amount, AmountError};
use ethers::types::U256;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TxFormError {
    #[error("Enter an amount")]
    Empty,
    #[error("{0}")]
    Amount(AmountError),
    #[error("Amount must be greater than zero")]
    Zero,
    #[error("Amount exceeds available {available} {symbol}")]
    ExceedsAvailable { available: String, symbol: String },
}

impl From<AmountError> for TxFormError {
    fn from(err: AmountError) -> Self {
        match err {
            AmountError::Empty => TxFormError::Empty,
            other => TxFormError::Amount(other),
        }
    }
}

/// Outcome of the last submit, shown under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Error(String),
    Staged(String),
}

#[derive(Debug, Clone)]
pub struct TransactionForm {
    kind: TxKind,
    pub amount_input: String,
    status: Option<FormStatus>,
}

impl TransactionForm {
    pub fn new(kind: TxKind) -> Self {
        Self {
            kind,
            amount_input: String::new(),
            status: None,
        }
    }

    pub fn kind(&self) -> TxKind {
        self.kind
    }

    pub fn status(&self) -> Option<&FormStatus> {
        self.status.as_ref()
    }

    pub fn action_label(&self) -> &'static str {
        match self.kind {
            TxKind::Deposit => "Deposit",
            TxKind::Withdraw => "Withdraw",
        }
    }

    /// Wallet balance of the vault token for deposits, the vault position for withdrawals
    pub fn available(&self, vault: &Vault, state: &StoreState) -> U256 {
        match self.kind {
            TxKind::Deposit => select_wallet_balance(state, vault.token.address),
            TxKind::Withdraw => vault.user_position,
        }
    }

    pub fn fill_max(&mut self, vault: &Vault, available: U256) {
        self.amount_input = format_token_input(available, u32::from(vault.token.decimals));
        self.status = None;
    }

    pub fn prepare(&self, vault: &Vault, available: U256) -> Result<TxIntent, TxFormError> {
        let decimals = u32::from(vault.token.decimals);
        let amount = parse_token_amount(&self.amount_input, decimals)?;
        if amount.is_zero() {
            return Err(TxFormError::Zero);
        }
        if amount > available {
            return Err(TxFormError::ExceedsAvailable {
                available: format_token_amount(available, decimals, 4),
                symbol: vault.token.symbol.clone(),
            });
        }
        Ok(TxIntent {
            kind: self.kind,
            vault: vault.address,
            vault_name: vault.display_name.clone(),
            token_symbol: vault.token.symbol.clone(),
            token_decimals: vault.token.decimals,
            amount,
            created_at: chrono::Utc::now(),
        })
    }

    /// Validate and stage. Clears the input on success; records the error otherwise.
    pub fn submit(&mut self, vault: &Vault, available: U256) -> Option<TxIntent> {
        match self.prepare(vault, available) {
            Ok(intent) => {
                let shown = format_token_amount(intent.amount, u32::from(intent.token_decimals), 4);
                self.status = Some(FormStatus::Staged(format!(
                    "Staged {} of {} {}",
                    intent.kind.label(),
                    shown,
                    intent.token_symbol
                )));
                self.amount_input.clear();
                Some(intent)
            }
            Err(err) => {
                self.status = Some(FormStatus::Error(err.to_string()));
                None
            }
        }
    }
}
