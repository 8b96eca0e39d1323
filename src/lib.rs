//! Vaultdesk: a desktop dashboard for browsing yield vaults and staging
//! deposit and withdraw transactions.

pub mod catalog;
pub mod config;
pub mod detail;
pub mod gui;
pub mod navigation;
pub mod operation_log;
pub mod store;
pub mod types;
pub mod user_settings;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_helpers;
