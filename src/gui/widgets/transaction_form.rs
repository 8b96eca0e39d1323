//! Deposit and withdraw panels
//!
//! The widgets only edit the form's input and report which button was
//! pressed; validation and staging happen in the detail view.

use crate::detail::{FormStatus, TransactionForm};
use crate::gui::theme::AppTheme;
use crate::types::Vault;
use crate::utils::format_token_amount;
use eframe::egui::{self, RichText};
use ethers::types::U256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    FillMax,
    Submit,
}

/// Panel behind the "Invest" tab
pub fn deposit_tx(
    ui: &mut egui::Ui,
    theme: &AppTheme,
    form: &mut TransactionForm,
    vault: &Vault,
    available: U256,
) -> FormAction {
    ui.label(
        RichText::new(format!("Deposit {} to start earning {}", vault.token.symbol, vault.display_name))
            .color(theme.text_secondary),
    );
    transaction_form(ui, theme, form, vault, available, "Wallet balance")
}

/// Panel behind the "Withdraw" tab
pub fn withdraw_tx(
    ui: &mut egui::Ui,
    theme: &AppTheme,
    form: &mut TransactionForm,
    vault: &Vault,
    available: U256,
) -> FormAction {
    ui.label(
        RichText::new(format!("Withdraw {} from {}", vault.token.symbol, vault.display_name))
            .color(theme.text_secondary),
    );
    transaction_form(ui, theme, form, vault, available, "Your position")
}

fn transaction_form(
    ui: &mut egui::Ui,
    theme: &AppTheme,
    form: &mut TransactionForm,
    vault: &Vault,
    available: U256,
    available_label: &str,
) -> FormAction {
    let mut action = FormAction::None;
    let decimals = u32::from(vault.token.decimals);

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new(available_label).color(theme.on_surface_sh1));
        ui.label(
            RichText::new(format!("{} {}", format_token_amount(available, decimals, 4), vault.token.symbol))
                .strong()
                .color(theme.text_primary),
        );
    });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let input = ui.add(
            egui::TextEdit::singleline(&mut form.amount_input)
                .hint_text(format!("0.00 {}", vault.token.symbol))
                .desired_width(240.0),
        );
        if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            action = FormAction::Submit;
        }
        if ui
            .add_enabled(!available.is_zero(), theme.button_small("Max"))
            .on_hover_text("Fill the full available amount")
            .clicked()
        {
            action = FormAction::FillMax;
        }
    });

    ui.add_space(10.0);
    if ui.add(theme.button_primary(form.action_label())).clicked() {
        action = FormAction::Submit;
    }

    match form.status() {
        Some(FormStatus::Error(message)) => {
            ui.add_space(4.0);
            ui.label(RichText::new(message).color(theme.error));
        }
        Some(FormStatus::Staged(message)) => {
            ui.add_space(4.0);
            ui.label(RichText::new(message).color(theme.success));
            ui.label(
                RichText::new("Staged only; sign it from your wallet to execute.")
                    .small()
                    .color(theme.text_secondary),
            );
        }
        None => {}
    }

    action
}
