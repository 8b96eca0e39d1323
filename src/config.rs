use crate::catalog::CatalogSource;
use crate::detail::ReadinessMode;
use crate::navigation::VAULTS_PATH;
use crate::user_settings::UserSettings;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// A known EVM network with its block explorer.
#[derive(Clone, Debug)]
pub struct EvmNetwork {
    pub label: &'static str,
    pub chain_id: u64,
    pub explorer: &'static str,
}

impl EvmNetwork {
    pub const fn new(label: &'static str, chain_id: u64, explorer: &'static str) -> Self {
        Self {
            label,
            chain_id,
            explorer,
        }
    }
}

/// Networks vaults are commonly deployed on.
pub const NETWORKS: &[EvmNetwork] = &[
    EvmNetwork::new("Ethereum", 1, "https://etherscan.io"),
    EvmNetwork::new("Sepolia", 11155111, "https://sepolia.etherscan.io"),
    EvmNetwork::new("Optimism", 10, "https://optimistic.etherscan.io"),
    EvmNetwork::new("Base", 8453, "https://basescan.org"),
    EvmNetwork::new("Polygon", 137, "https://polygonscan.com"),
    EvmNetwork::new("Arbitrum One", 42161, "https://arbiscan.io"),
    EvmNetwork::new("Gnosis Chain", 100, "https://gnosisscan.io"),
];

/// Find a network by chain ID
pub fn find_network_by_chain_id(chain_id: u64) -> Option<&'static EvmNetwork> {
    NETWORKS.iter().find(|n| n.chain_id == chain_id)
}

/// Get the full URL to view an address on the block explorer
pub fn get_address_explorer_url(chain_id: u64, address: &str) -> Option<String> {
    find_network_by_chain_id(chain_id).map(|n| format!("{}/address/{}", n.explorer, address))
}

pub const DEFAULT_CHAIN_ID: u64 = 1;
pub const DEFAULT_FETCH_DELAY_MS: u64 = 600;

#[derive(Clone, Debug)]
pub struct Config {
    pub catalog: CatalogSource,
    pub chain_id: u64,
    pub readiness_mode: ReadinessMode,
    /// Artificial latency applied to every catalog fetch
    pub fetch_delay: Duration,
    /// Automatic refresh period; `None` disables auto refresh
    pub refresh_interval: Option<Duration>,
    pub start_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogSource::Embedded,
            chain_id: DEFAULT_CHAIN_ID,
            readiness_mode: ReadinessMode::default(),
            fetch_delay: Duration::from_millis(DEFAULT_FETCH_DELAY_MS),
            refresh_interval: None,
            start_path: VAULTS_PATH.to_string(),
        }
    }
}

fn parse_or_warn<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring invalid {}='{}': {}", key, raw, e);
            None
        }
    }
}

fn refresh_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

impl Config {
    /// Build a config from the process environment (`.env` already loaded)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset or invalid keys keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("VAULTDESK_CATALOG").filter(|p| !p.trim().is_empty()) {
            config.catalog = CatalogSource::File(PathBuf::from(path.trim()));
        }
        if let Some(chain_id) = parse_or_warn("VAULTDESK_CHAIN_ID", lookup("VAULTDESK_CHAIN_ID")) {
            config.chain_id = chain_id;
        }
        if let Some(mode) = parse_or_warn("VAULTDESK_READINESS", lookup("VAULTDESK_READINESS")) {
            config.readiness_mode = mode;
        }
        if let Some(ms) = parse_or_warn::<u64>("VAULTDESK_FETCH_DELAY_MS", lookup("VAULTDESK_FETCH_DELAY_MS")) {
            config.fetch_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_or_warn::<u64>("VAULTDESK_REFRESH_SECS", lookup("VAULTDESK_REFRESH_SECS")) {
            config.refresh_interval = refresh_from_secs(secs);
        }
        if let Some(path) = lookup("VAULTDESK_START_PATH").filter(|p| !p.trim().is_empty()) {
            config.start_path = path.trim().to_string();
        }
        config
    }

    /// Saved user settings take precedence over environment defaults
    pub fn apply_user_settings(&mut self, settings: &UserSettings) {
        if let Some(path) = &settings.catalog_path {
            self.catalog = CatalogSource::File(path.clone());
        }
        if let Some(mode) = settings.readiness_mode {
            self.readiness_mode = mode;
        }
        if let Some(secs) = settings.refresh_interval_secs {
            self.refresh_interval = refresh_from_secs(secs);
        }
    }

    pub fn network_label(&self) -> String {
        find_network_by_chain_id(self.chain_id)
            .map(|n| n.label.to_string())
            .unwrap_or_else(|| format!("Chain {}", self.chain_id))
    }
}
