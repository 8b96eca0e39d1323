//! Vault catalog loading.
//!
//! A catalog is a JSON document listing vaults and the connected wallet's
//! token balances. Vaults and wallet tokens are fetched by separate calls so
//! the store can track their loading status independently.

use crate::types::{Vault, WalletToken};
use ethers::types::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Catalog bundled with the binary, used when no catalog file is configured
pub static SAMPLE_CATALOG: &str = include_str!("../assets/sample_catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate vault address {0:?} in catalog")]
    DuplicateVault(Address),
}

/// Wallet portion of the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub tokens: Vec<WalletToken>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub vaults: Vec<Vault>,
    #[serde(default)]
    pub wallet: WalletSnapshot,
}

/// Where the catalog is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Embedded,
    File(PathBuf),
}

impl CatalogSource {
    pub fn label(&self) -> String {
        match self {
            CatalogSource::Embedded => "built-in sample".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
        }
    }

    pub async fn read(&self) -> Result<Catalog, CatalogError> {
        match self {
            CatalogSource::Embedded => parse_catalog(SAMPLE_CATALOG),
            CatalogSource::File(path) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| CatalogError::Io {
                        path: path.clone(),
                        source,
                    })?;
                parse_catalog(&content)
            }
        }
    }
}

/// Parse and validate a catalog document
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_json::from_str(json)?;
    let mut seen = HashSet::with_capacity(catalog.vaults.len());
    for vault in &catalog.vaults {
        if !seen.insert(vault.address) {
            return Err(CatalogError::DuplicateVault(vault.address));
        }
    }
    Ok(catalog)
}

/// Fetch the vault list, waiting `delay` first to mimic network latency
pub async fn fetch_vaults(source: &CatalogSource, delay: Duration) -> Result<Vec<Vault>, CatalogError> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let catalog = source.read().await?;
    tracing::info!("Fetched {} vaults from {}", catalog.vaults.len(), source.label());
    Ok(catalog.vaults)
}

/// Fetch the wallet's token balances, waiting `delay` first to mimic network latency
pub async fn fetch_wallet_tokens(
    source: &CatalogSource,
    delay: Duration,
) -> Result<WalletSnapshot, CatalogError> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let catalog = source.read().await?;
    tracing::info!(
        "Fetched {} wallet tokens from {}",
        catalog.wallet.tokens.len(),
        source.label()
    );
    Ok(catalog.wallet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_catalog_path(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("vaultdesk_{}_{}.json", tag, nanos))
    }

    #[test]
    fn test_sample_catalog_parses() {
        let catalog = parse_catalog(SAMPLE_CATALOG).unwrap();
        assert_eq!(catalog.vaults.len(), 3);
        assert!(catalog.wallet.address.is_some());
        assert_eq!(catalog.wallet.tokens.len(), 2);
    }

    #[test]
    fn test_duplicate_vault_rejected() {
        let mut catalog = parse_catalog(SAMPLE_CATALOG).unwrap();
        let first = catalog.vaults[0].clone();
        catalog.vaults.push(first.clone());
        let json = serde_json::to_string(&catalog).unwrap();

        match parse_catalog(&json) {
            Err(CatalogError::DuplicateVault(address)) => assert_eq!(address, first.address),
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_wallet_section_is_optional() {
        let json = r#"{ "vaults": [] }"#;
        let catalog = parse_catalog(json).unwrap();
        assert!(catalog.vaults.is_empty());
        assert_eq!(catalog.wallet, WalletSnapshot::default());
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = parse_catalog("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_fetch_from_embedded_source() {
        let vaults = tokio_test::block_on(fetch_vaults(&CatalogSource::Embedded, Duration::ZERO)).unwrap();
        assert_eq!(vaults[0].display_name, "USDC");

        let wallet =
            tokio_test::block_on(fetch_wallet_tokens(&CatalogSource::Embedded, Duration::from_millis(5))).unwrap();
        assert_eq!(wallet.tokens[0].symbol, "USDC");
    }

    #[test]
    fn test_fetch_from_file_source() {
        let path = temp_catalog_path("file_source");
        std::fs::write(&path, SAMPLE_CATALOG).unwrap();

        let source = CatalogSource::File(path.clone());
        let vaults = tokio_test::block_on(fetch_vaults(&source, Duration::ZERO)).unwrap();
        assert_eq!(vaults.len(), 3);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = CatalogSource::File(temp_catalog_path("missing"));
        let err = tokio_test::block_on(fetch_vaults(&source, Duration::ZERO)).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("failed to read catalog"));
    }
}
