//! View modules for the GUI
//!
//! Each submodule adds rendering methods to `VaultdeskApp`.
//!
//! ## Module Structure
//!
//! - `vault_list` - the `/vaults` page: vault grid and staged transactions
//! - `vault_detail` - the `/vault/{address}` page
//! - `settings` - settings window (catalog file, readiness mode, auto refresh)
//!
//! These methods are called from the main `App::update` method in `app.rs`.

pub mod settings;
pub mod vault_detail;
pub mod vault_list;
