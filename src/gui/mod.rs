//! GUI module for the Vaultdesk application
//!
//! This module provides the graphical user interface built with egui/eframe.
//!
//! ## Module Structure
//!
//! - `app` - VaultdeskApp shell: store ownership, fetch jobs, routing
//! - `async_job` - Generic async job polling for background tasks
//! - `theme` - Centralized theme and layout tokens (AppTheme, StyleToken)
//! - `helpers` - Window icon, token glyphs, external links, icon cache
//! - `notifications` - Bounded notification feed
//! - `views` - Page rendering (vault list, vault detail, settings)
//! - `widgets` - Reusable UI widgets (token icon, line chart, transaction forms)
//!
//! ## Usage
//!
//! ```no_run
//! use vaultdesk::config::Config;
//! use vaultdesk::gui;
//!
//! let config = Config::default();
//! gui::launch(config).expect("Failed to launch GUI");
//! ```

mod app;
pub mod async_job;
pub mod helpers;
pub mod notifications;
pub mod theme;
pub mod views;
pub mod widgets;

pub use app::{launch, VaultdeskApp};

pub use async_job::{spawn_job, AsyncJob};
pub use helpers::load_icon;
pub use notifications::{NotificationEntry, NotificationLevel, Notifications};
pub use theme::{configure_style, AppTheme, StyleToken};
