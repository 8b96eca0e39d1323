//! Render model of the vault detail page.
//!
//! The model is built fresh every frame from the view state and a store
//! snapshot; the egui renderer only walks it.

use super::readiness::BodyBranch;
use super::tabs::{TabController, TransactionTab};
use crate::types::{ChartSeries, Vault};
use crate::utils::{format_percent, normalize_usdc};

pub const BACK_LABEL: &str = "Back to Vaults Page";
pub const OVERVIEW_HEADER: &str = "Overview";
pub const ACTIONS_HEADER: &str = "Transactions";
pub const CHART_HEADER: &str = "Performance";
pub const CHART_TOOLTIP_LABEL: &str = "Earning Over Time";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    Small,
    Big,
    XBig,
}

impl IconSize {
    pub fn points(self) -> f32 {
        match self {
            IconSize::Small => 24.0,
            IconSize::Big => 40.0,
            IconSize::XBig => 64.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenIconProps {
    pub icon: Option<String>,
    pub symbol: String,
    pub size: IconSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Emphasis,
    Plain,
    Link,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
    pub kind: RowKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewCard {
    pub title: String,
    pub icon: TokenIconProps,
    pub rows: Vec<InfoRow>,
    pub about: Option<String>,
    pub strategies: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabHeader {
    pub tab: TransactionTab,
    pub label: &'static str,
    pub selected: bool,
}

/// Both panels are always present; only `visible` differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabPanelSlot {
    pub tab: TransactionTab,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionsCard {
    pub tabs: Vec<TabHeader>,
    pub panels: Vec<TabPanelSlot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartCard {
    pub series: ChartSeries,
    pub tooltip_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentLayout {
    pub overview: OverviewCard,
    pub actions: ActionsCard,
    pub chart: ChartCard,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailBody {
    Spinner,
    Content(Box<ContentLayout>),
    Blank,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailLayout {
    pub back_label: &'static str,
    pub body: DetailBody,
}

impl DetailLayout {
    pub fn build(branch: BodyBranch, vault: Option<&Vault>, tabs: &TabController) -> Self {
        let body = match (branch, vault) {
            (BodyBranch::Spinner, _) => DetailBody::Spinner,
            (BodyBranch::Content, Some(vault)) => DetailBody::Content(Box::new(ContentLayout {
                overview: overview_card(vault),
                actions: actions_card(tabs),
                chart: ChartCard {
                    series: ChartSeries::for_vault(vault),
                    tooltip_label: CHART_TOOLTIP_LABEL,
                },
            })),
            _ => DetailBody::Blank,
        };
        Self {
            back_label: BACK_LABEL,
            body,
        }
    }

    pub fn content(&self) -> Option<&ContentLayout> {
        match &self.body {
            DetailBody::Content(content) => Some(content),
            _ => None,
        }
    }
}

pub fn default_strategy_text(display_name: &str) -> String {
    format!(
        "This vault supplies the {name} on Compound and borrows an additional amount of {name} to maximize COMP farming. ( 1 of 9 )",
        name = display_name
    )
}

pub fn overview_card(vault: &Vault) -> OverviewCard {
    let mut rows = vec![
        InfoRow {
            label: "APY",
            value: format_percent(vault.apy, 2),
            kind: RowKind::Emphasis,
        },
        InfoRow {
            label: "Total Assets",
            value: normalize_usdc(vault.vault_balance_usdc, 0),
            kind: RowKind::Plain,
        },
        InfoRow {
            label: "Type",
            value: vault.token.categories.join(", "),
            kind: RowKind::Plain,
        },
    ];
    rows.push(InfoRow {
        label: "Website",
        value: vault.token.website.clone().unwrap_or_default(),
        kind: if vault.token.website.is_some() {
            RowKind::Link
        } else {
            RowKind::Plain
        },
    });

    OverviewCard {
        title: vault.display_name.clone(),
        icon: TokenIconProps {
            icon: vault.token.icon.clone(),
            symbol: vault.token.name.clone(),
            size: IconSize::XBig,
        },
        rows,
        about: vault
            .token
            .description
            .clone()
            .filter(|d| !d.trim().is_empty()),
        strategies: vault
            .strategy
            .clone()
            .unwrap_or_else(|| default_strategy_text(&vault.display_name)),
    }
}

pub fn actions_card(tabs: &TabController) -> ActionsCard {
    ActionsCard {
        tabs: TransactionTab::ALL
            .iter()
            .map(|&tab| TabHeader {
                tab,
                label: tab.label(),
                selected: tabs.selected() == tab,
            })
            .collect(),
        panels: TransactionTab::ALL
            .iter()
            .map(|&tab| TabPanelSlot {
                tab,
                visible: tabs.is_visible(tab),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_vault;

    #[test]
    fn test_overview_rows() {
        let vault = sample_vault();
        let card = overview_card(&vault);
        let labels: Vec<_> = card.rows.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["APY", "Total Assets", "Type", "Website"]);
        assert_eq!(card.rows[0].value, "7.31%");
        assert_eq!(card.rows[1].value, "48,213,977");
        assert_eq!(card.rows[2].value, "Stablecoin");
        assert_eq!(card.rows[3].kind, RowKind::Link);
        assert_eq!(card.icon.size, IconSize::XBig);
        // the overview glyph is labelled with the token's full name
        assert_eq!(card.icon.symbol, vault.token.name);
    }

    #[test]
    fn test_about_hidden_without_description() {
        let mut vault = sample_vault();
        vault.token.description = None;
        assert!(overview_card(&vault).about.is_none());

        vault.token.description = Some("   ".into());
        assert!(overview_card(&vault).about.is_none());
    }

    #[test]
    fn test_strategy_falls_back_to_template() {
        let mut vault = sample_vault();
        vault.strategy = None;
        let card = overview_card(&vault);
        assert!(card.strategies.starts_with("This vault supplies the USDC"));
        assert!(card.strategies.ends_with("to maximize COMP farming. ( 1 of 9 )"));

        vault.strategy = Some("Custom".into());
        assert_eq!(overview_card(&vault).strategies, "Custom");
    }

    #[test]
    fn test_actions_card_keeps_both_panels() {
        let mut tabs = TabController::new();
        tabs.select(TransactionTab::Withdraw);
        let card = actions_card(&tabs);

        assert_eq!(card.panels.len(), 2);
        assert!(!card.panels[0].visible);
        assert!(card.panels[1].visible);
        assert_eq!(card.tabs[0].label, "Invest");
        assert!(card.tabs[1].selected);
    }

    #[test]
    fn test_content_branch_without_vault_is_blank() {
        let layout = DetailLayout::build(BodyBranch::Content, None, &TabController::new());
        assert_eq!(layout.body, DetailBody::Blank);
        assert_eq!(layout.back_label, BACK_LABEL);
    }
}
