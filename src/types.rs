//! Common types shared across modules.

use chrono::{DateTime, NaiveDate, Utc};
use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

/// Underlying token of a vault together with the metadata shown on the overview card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Local path of a PNG icon; a generated glyph is drawn when absent.
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One dated sample of a vault's performance history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// A yield-bearing vault as published by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vault {
    pub address: Address,
    pub display_name: String,
    pub token: Token,
    /// Annual yield as a fraction (0.05 = 5%)
    pub apy: f64,
    /// Total assets held by the vault, in USDC base units (6 decimals)
    #[serde(with = "u256_dec")]
    pub vault_balance_usdc: U256,
    /// Amount of the underlying token the wallet has deposited, in token base units
    #[serde(with = "u256_dec", default)]
    pub user_position: U256,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub performance: Vec<PerformancePoint>,
}

/// Balance of one token held by the connected wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletToken {
    pub token_address: Address,
    pub symbol: String,
    #[serde(with = "u256_dec")]
    pub balance: U256,
}

/// Named series fed to the performance chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub id: String,
    pub points: Vec<PerformancePoint>,
}

impl ChartSeries {
    pub fn for_vault(vault: &Vault) -> Self {
        Self {
            id: vault.token.symbol.to_lowercase(),
            points: vault.performance.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    Deposit,
    Withdraw,
}

impl TxKind {
    pub fn label(self) -> &'static str {
        match self {
            TxKind::Deposit => "deposit",
            TxKind::Withdraw => "withdraw",
        }
    }
}

/// A validated deposit or withdraw request, staged for the user to sign elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct TxIntent {
    pub kind: TxKind,
    pub vault: Address,
    pub vault_name: String,
    pub token_symbol: String,
    pub token_decimals: u8,
    pub amount: U256,
    pub created_at: DateTime<Utc>,
}

/// Serde adapter storing U256 amounts as decimal strings.
pub mod u256_dec {
    use ethers::types::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        U256::from_dec_str(raw.trim()).map_err(serde::de::Error::custom)
    }
}
