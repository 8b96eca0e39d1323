//! Settings view implementation
//!
//! Contains the settings window:
//! - Catalog file selection
//! - Readiness mode for the detail page
//! - Auto refresh interval
//! - Paths of the settings file and the operation log

use crate::detail::ReadinessMode;
use crate::gui::app::VaultdeskApp;
use crate::operation_log;
use crate::user_settings::UserSettings;
use eframe::egui::{self, RichText};

impl VaultdeskApp {
    /// Render the settings window
    pub(crate) fn view_settings(&mut self, ctx: &egui::Context) {
        let theme = self.theme;
        let mut open = self.show_settings;
        let mut save = false;
        let mut reload = false;

        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .default_width(520.0)
            .show(ctx, |ui| {
                let form = &mut self.settings_form;

                ui.label(RichText::new("Catalog").strong().color(theme.text_primary));
                ui.label(
                    RichText::new("JSON file with vaults and wallet balances. Leave empty for the bundled sample.")
                        .small()
                        .color(theme.text_secondary),
                );
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut form.catalog_path)
                            .hint_text("bundled sample catalog")
                            .desired_width(360.0),
                    );
                    if ui.button("Browse...").clicked() {
                        if let Some(path) = rfd::FileDialog::new().add_filter("JSON files", &["json"]).pick_file() {
                            form.catalog_path = path.display().to_string();
                        }
                    }
                });

                ui.add_space(10.0);
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([16.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Readiness mode");
                        egui::ComboBox::from_id_source("readiness_mode")
                            .selected_text(form.readiness_mode.as_str())
                            .show_ui(ui, |ui| {
                                for mode in ReadinessMode::ALL {
                                    ui.selectable_value(&mut form.readiness_mode, mode, mode.as_str());
                                }
                            });
                        ui.end_row();

                        ui.label("Auto refresh (seconds)");
                        ui.add(egui::DragValue::new(&mut form.refresh_secs).clamp_range(0..=3600).speed(1.0))
                            .on_hover_text("0 disables auto refresh");
                        ui.end_row();
                    });

                let hint = match form.readiness_mode {
                    ReadinessMode::Lenient => "Spinner only while a fetch is in flight.",
                    ReadinessMode::Strict => "Spinner until both vaults and balances completed a fetch.",
                };
                ui.label(RichText::new(hint).small().color(theme.text_secondary));

                ui.add_space(10.0);
                ui.separator();
                ui.label(
                    RichText::new(format!("Settings file: {}", UserSettings::settings_path_display()))
                        .small()
                        .color(theme.text_secondary),
                );
                ui.label(
                    RichText::new(format!("Operation log: {}", operation_log::log_file_path()))
                        .small()
                        .color(theme.text_secondary),
                );

                ui.horizontal(|ui| {
                    ui.label(RichText::new("Recent operations").strong().color(theme.text_primary));
                    if ui.small_button("Reload").clicked() {
                        reload = true;
                    }
                });
                match &self.recent_operations {
                    Ok(lines) if lines.is_empty() => {
                        ui.label(RichText::new("No operations logged yet").color(theme.text_secondary));
                    }
                    Ok(lines) => {
                        egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                            for line in lines {
                                ui.label(RichText::new(line.as_str()).monospace().small());
                            }
                        });
                    }
                    Err(e) => {
                        ui.label(RichText::new(format!("Could not read log: {}", e)).color(theme.error));
                    }
                }

                ui.add_space(10.0);
                if ui.add(theme.button_primary("Save")).clicked() {
                    save = true;
                }
            });

        if reload {
            self.reload_recent_operations();
        }
        if save {
            self.apply_settings();
            open = false;
        }
        self.show_settings = open;
    }
}
