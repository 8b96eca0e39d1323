//! Vault detail view implementation
//!
//! Walks the [`DetailLayout`] built by the detail view state:
//! - back button (always shown)
//! - spinner, or overview + transactions + performance cards, or nothing
//!
//! [`DetailLayout`]: crate::detail::DetailLayout

use crate::config::get_address_explorer_url;
use crate::detail::layout::{
    ActionsCard, ChartCard, ContentLayout, OverviewCard, RowKind, ACTIONS_HEADER, CHART_HEADER, OVERVIEW_HEADER,
};
use crate::detail::{DetailBody, TransactionTab, VaultDetailView};
use crate::gui::app::VaultdeskApp;
use crate::gui::helpers::open_external;
use crate::gui::theme::StyleToken;
use crate::gui::widgets::{deposit_tx, export_series_csv, line_chart, token_icon, withdraw_tx, FormAction};
use crate::store::select_selected_vault;
use crate::types::{ChartSeries, Vault};
use anyhow::Result;
use eframe::egui::{self, RichText};
use std::fs::File;
use std::path::Path;

/// Narrower than this, the overview and transactions cards stack vertically
const MIN_OVERVIEW_WIDTH: f32 = 360.0;

impl VaultdeskApp {
    /// Render the vault detail page
    pub(crate) fn view_vault_detail(&mut self, ui: &mut egui::Ui) {
        let Some(mut detail) = self.detail.take() else {
            return;
        };
        detail.sync();
        let layout = detail.layout(self.store.state());

        ui.add_space(12.0);
        if ui.add(self.theme.button_back(layout.back_label)).clicked() {
            detail.go_back();
        }
        ui.add_space(self.theme.space(StyleToken::CardGap));

        match &layout.body {
            DetailBody::Spinner => {
                ui.vertical_centered(|ui| {
                    ui.add_space(80.0);
                    ui.add(egui::Spinner::new().size(48.0));
                });
            }
            DetailBody::Content(content) => {
                if let Some(vault) = select_selected_vault(self.store.state()).cloned() {
                    self.render_detail_content(ui, &mut detail, content, &vault);
                }
            }
            DetailBody::Blank => {}
        }

        self.detail = Some(detail);
    }

    fn render_detail_content(
        &mut self,
        ui: &mut egui::Ui,
        detail: &mut VaultDetailView,
        content: &ContentLayout,
        vault: &Vault,
    ) {
        let gap = self.theme.space(StyleToken::CardGap);
        let actions_width = self.theme.space(StyleToken::ActionsWidth);

        if ui.available_width() < actions_width + gap + MIN_OVERVIEW_WIDTH {
            self.render_overview(ui, &content.overview, vault);
            ui.add_space(gap);
            self.render_actions(ui, detail, &content.actions, vault);
        } else {
            ui.horizontal_top(|ui| {
                let overview_width = ui.available_width() - actions_width - gap;
                ui.allocate_ui(egui::vec2(overview_width, 0.0), |ui| {
                    ui.set_width(overview_width);
                    self.render_overview(ui, &content.overview, vault);
                });
                ui.add_space(gap);
                ui.allocate_ui(egui::vec2(actions_width, 0.0), |ui| {
                    ui.set_width(actions_width);
                    self.render_actions(ui, detail, &content.actions, vault);
                });
            });
        }

        ui.add_space(gap);
        self.render_chart(ui, &content.chart);
    }

    fn render_overview(&mut self, ui: &mut egui::Ui, card: &OverviewCard, vault: &Vault) {
        let theme = self.theme;
        let mut open_link: Option<String> = None;

        theme.frame_card().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(theme.header(OVERVIEW_HEADER));
            ui.add_space(theme.space(StyleToken::CardPadding));

            ui.horizontal_top(|ui| {
                theme.frame_logo().show(ui, |ui| {
                    token_icon(ui, &mut self.icons, &card.icon);
                });
                ui.add_space(theme.space(StyleToken::OverviewGap));
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(&card.title)
                            .size(theme.title_size)
                            .strong()
                            .color(theme.secondary),
                    );
                    ui.add_space(theme.space(StyleToken::CardContentOffset));
                    egui::Grid::new("overview_rows")
                        .num_columns(2)
                        .min_col_width(theme.space(StyleToken::InfoLabelWidth))
                        .spacing([6.0, theme.space(StyleToken::InfoRowGap)])
                        .show(ui, |ui| {
                            for row in &card.rows {
                                ui.label(RichText::new(row.label).size(theme.row_text_size).color(theme.on_surface_sh1));
                                match row.kind {
                                    RowKind::Emphasis => {
                                        ui.label(
                                            RichText::new(&row.value)
                                                .size(theme.row_text_size)
                                                .strong()
                                                .color(theme.secondary),
                                        );
                                    }
                                    RowKind::Plain => {
                                        ui.add(
                                            egui::Label::new(
                                                RichText::new(&row.value)
                                                    .size(theme.row_text_size)
                                                    .color(theme.text_secondary),
                                            )
                                            .truncate(true),
                                        );
                                    }
                                    RowKind::Link => {
                                        let link = ui.link(RichText::new(&row.value).size(theme.row_text_size));
                                        if link.on_hover_text("Open in browser").clicked() {
                                            open_link = Some(row.value.clone());
                                        }
                                    }
                                }
                                ui.end_row();
                            }
                        });
                });
            });

            ui.add_space(theme.space(StyleToken::CardPadding));
            let address = format!("{:?}", vault.address);
            ui.horizontal(|ui| {
                ui.label(RichText::new(&address).monospace().small().color(theme.text_secondary));
                if ui.small_button("Copy").clicked() {
                    ui.output_mut(|o| o.copied_text = address.clone());
                }
                if let Some(url) = get_address_explorer_url(self.config.chain_id, &address) {
                    if ui.small_button("Explorer").clicked() {
                        open_link = Some(url);
                    }
                }
            });

            if let Some(about) = &card.about {
                ui.add_space(theme.space(StyleToken::CardGap));
                theme.frame_surface().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(theme.sub_header("About"));
                    ui.add_space(theme.space(StyleToken::CardContentOffset));
                    ui.label(RichText::new(about).color(theme.text_primary));
                });
            }

            ui.add_space(theme.space(StyleToken::CardGap));
            theme.frame_surface().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(theme.sub_header("Strategies"));
                ui.add_space(theme.space(StyleToken::CardContentOffset));
                ui.label(RichText::new(&card.strategies).color(theme.text_primary));
            });
        });

        if let Some(link) = open_link {
            if let Err(e) = open_external(&link) {
                self.notifications.error(e.to_string());
            }
        }
    }

    fn render_actions(
        &mut self,
        ui: &mut egui::Ui,
        detail: &mut VaultDetailView,
        card: &ActionsCard,
        vault: &Vault,
    ) {
        let theme = self.theme;
        let mut clicked_tab: Option<TransactionTab> = None;
        let mut form_action: Option<(TransactionTab, FormAction)> = None;

        theme.frame_card().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(theme.header(ACTIONS_HEADER));
            ui.add_space(theme.space(StyleToken::TabsOffset));

            ui.horizontal(|ui| {
                for header in &card.tabs {
                    let label = RichText::new(header.label).size(theme.sub_header_size);
                    if ui.selectable_label(header.selected, label).clicked() {
                        clicked_tab = Some(header.tab);
                    }
                }
            });
            ui.separator();
            ui.add_space(theme.space(StyleToken::TabPanelOffset));

            let state = self.store.state();
            for slot in card.panels.iter().filter(|slot| slot.visible) {
                let form = detail.form_mut(slot.tab);
                let available = form.available(vault, state);
                let action = match slot.tab {
                    TransactionTab::Deposit => deposit_tx(ui, &theme, form, vault, available),
                    TransactionTab::Withdraw => withdraw_tx(ui, &theme, form, vault, available),
                };
                if action != FormAction::None {
                    form_action = Some((slot.tab, action));
                }
            }
        });

        if let Some(tab) = clicked_tab {
            detail.select_tab(tab);
        }
        match form_action {
            Some((tab, FormAction::FillMax)) => detail.fill_max(tab, self.store.state()),
            Some((tab, FormAction::Submit)) => {
                if let Some(intent) = detail.submit(tab, self.store.state()) {
                    self.stage_transaction(intent);
                }
            }
            _ => {}
        }
    }

    fn render_chart(&mut self, ui: &mut egui::Ui, card: &ChartCard) {
        let theme = self.theme;
        let mut export = false;

        theme.frame_card().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(theme.header(CHART_HEADER));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(!card.series.is_empty(), theme.button_small("Export CSV"))
                        .clicked()
                    {
                        export = true;
                    }
                });
            });
            ui.add_space(theme.space(StyleToken::ChartOffset));
            line_chart(ui, &theme, &card.series, card.tooltip_label);
        });

        if export {
            self.export_chart(&card.series);
        }
    }

    fn export_chart(&mut self, series: &ChartSeries) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_file_name(format!("{}_performance.csv", series.id))
            .save_file()
        else {
            return;
        };
        match write_series_file(series, &path) {
            Ok(()) => self
                .notifications
                .success(format!("Exported {} points to {}", series.points.len(), path.display())),
            Err(e) => self.notifications.error(format!("Failed to export chart: {}", e)),
        }
    }
}

fn write_series_file(series: &ChartSeries, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    export_series_csv(series, file)
}
