//! Deposit/withdraw tab selection.

use crate::types::TxKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransactionTab {
    #[default]
    Deposit,
    Withdraw,
}

impl TransactionTab {
    pub const ALL: [TransactionTab; 2] = [TransactionTab::Deposit, TransactionTab::Withdraw];

    /// Text shown on the tab header
    pub fn label(self) -> &'static str {
        match self {
            TransactionTab::Deposit => "Invest",
            TransactionTab::Withdraw => "Withdraw",
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            TransactionTab::Deposit => "deposit",
            TransactionTab::Withdraw => "withdraw",
        }
    }

    pub fn kind(self) -> TxKind {
        match self {
            TransactionTab::Deposit => TxKind::Deposit,
            TransactionTab::Withdraw => TxKind::Withdraw,
        }
    }
}

/// Holds the selected tab. Any tab can be selected at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabController {
    selected: TransactionTab,
}

impl TabController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> TransactionTab {
        self.selected
    }

    pub fn select(&mut self, tab: TransactionTab) {
        if self.selected != tab {
            tracing::debug!(tab = tab.value(), "transaction tab selected");
        }
        self.selected = tab;
    }

    /// A panel is visible only while its tab is the selected one
    pub fn is_visible(&self, tab: TransactionTab) -> bool {
        self.selected == tab
    }
}
