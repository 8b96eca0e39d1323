//! Widget components for the GUI
//!
//! Reusable widgets embedded by the views.
//!
//! ## Available Widgets
//!
//! - `token_icon` - token logo, or a generated glyph when no icon file is available
//! - `line_chart` - performance line chart with hover tooltip and CSV export
//! - `transaction_form` - deposit/withdraw amount forms

pub mod line_chart;
pub mod token_icon;
pub mod transaction_form;

pub use line_chart::{export_series_csv, line_chart};
pub use token_icon::token_icon;
pub use transaction_form::{deposit_tx, withdraw_tx, FormAction};
