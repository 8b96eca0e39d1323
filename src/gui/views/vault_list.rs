//! Vault list view implementation
//!
//! Grid of every catalog vault; clicking a row opens its detail page.

use crate::detail::layout::{IconSize, TokenIconProps};
use crate::gui::app::VaultdeskApp;
use crate::gui::theme::StyleToken;
use crate::gui::widgets::token_icon;
use crate::navigation::{NavigationRequest, Route};
use crate::store::{select_vaults_status, select_wallet_tokens_status};
use crate::utils::{format_percent, format_token_amount, normalize_usdc};
use eframe::egui::{self, RichText};
use ethers::types::Address;

impl VaultdeskApp {
    /// Render the vault list page
    pub(crate) fn view_vault_list(&mut self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.label(self.theme.header("Vaults"));
            ui.add_space(12.0);
            let refreshing = self.is_refreshing();
            if ui
                .add_enabled(!refreshing, self.theme.button_small("Refresh"))
                .on_hover_text("Reload vaults and wallet balances")
                .clicked()
            {
                self.start_refresh();
            }
            if refreshing {
                ui.spinner();
            }
        });
        ui.label(
            RichText::new(format!("Catalog: {}", self.config.catalog.label()))
                .small()
                .color(self.theme.text_secondary),
        );
        ui.add_space(12.0);

        let state = self.store.state();
        for (what, status) in [
            ("vaults", select_vaults_status(state)),
            ("wallet balances", select_wallet_tokens_status(state)),
        ] {
            if let Some(error) = &status.error {
                ui.label(RichText::new(format!("Could not load {}: {}", what, error)).color(self.theme.error));
            }
        }

        let mut clicked: Option<Address> = None;
        let theme = self.theme;
        self.theme.frame_card().show(ui, |ui| {
            let state = self.store.state();
            if state.vaults.items.is_empty() {
                let text = if state.vaults.status.loading {
                    "Loading vaults..."
                } else {
                    "No vaults in the catalog"
                };
                ui.label(RichText::new(text).color(theme.text_secondary));
                return;
            }

            egui::Grid::new("vault_list_grid")
                .num_columns(6)
                .spacing([24.0, 10.0])
                .striped(true)
                .show(ui, |ui| {
                    for header in ["", "Vault", "APY", "Total Assets", "Your Position", ""] {
                        ui.label(RichText::new(header).strong().color(theme.on_surface_sh1));
                    }
                    ui.end_row();

                    for vault in &state.vaults.items {
                        let props = TokenIconProps {
                            icon: vault.token.icon.clone(),
                            symbol: vault.token.symbol.clone(),
                            size: IconSize::Big,
                        };
                        token_icon(ui, &mut self.icons, &props);

                        let name = ui.add(
                            egui::Label::new(RichText::new(&vault.display_name).strong().color(theme.text_primary))
                                .sense(egui::Sense::click()),
                        );
                        if name.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
                            clicked = Some(vault.address);
                        }
                        ui.label(RichText::new(format_percent(vault.apy, 2)).color(theme.secondary));
                        ui.label(format!("${}", normalize_usdc(vault.vault_balance_usdc, 0)));
                        ui.label(format!(
                            "{} {}",
                            format_token_amount(vault.user_position, u32::from(vault.token.decimals), 4),
                            vault.token.symbol
                        ));
                        if ui.add(theme.button_small("Open")).clicked() {
                            clicked = Some(vault.address);
                        }
                        ui.end_row();
                    }
                });
        });

        self.render_staged_transactions(ui);

        if let Some(address) = clicked {
            self.request_navigation(NavigationRequest::to(&Route::VaultDetail(address)));
        }
    }

    fn render_staged_transactions(&self, ui: &mut egui::Ui) {
        let staged = &self.store.state().staged;
        if staged.is_empty() {
            return;
        }
        ui.add_space(self.theme.space(StyleToken::CardGap));
        self.theme.frame_card().show(ui, |ui| {
            ui.label(self.theme.header("Staged Transactions"));
            ui.add_space(8.0);
            egui::Grid::new("staged_tx_grid")
                .num_columns(4)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    for intent in staged.iter().rev() {
                        ui.label(intent.created_at.format("%Y-%m-%d %H:%M").to_string());
                        ui.label(RichText::new(intent.kind.label()).strong());
                        ui.label(format!(
                            "{} {}",
                            format_token_amount(intent.amount, u32::from(intent.token_decimals), 4),
                            intent.token_symbol
                        ));
                        ui.label(intent.vault_name.as_str());
                        ui.end_row();
                    }
                });
        });
    }
}
