//! Main GUI application module
//!
//! Contains the VaultdeskApp shell: it owns the store, runs the catalog
//! fetches in the background, routes between the vault list and the vault
//! detail page, and hosts the settings window and notifications.

use crate::{
    catalog::{self, WalletSnapshot},
    config::Config,
    detail::{ReadinessMode, VaultDetailView},
    navigation::{NavigationRequest, Navigator, Route},
    operation_log,
    store::{Store, StoreAction},
    types::{TxIntent, Vault},
    user_settings::UserSettings,
};
use anyhow::{anyhow, Result};
use eframe::{egui, egui::RichText, App, Frame, NativeOptions};
use std::time::{Duration, Instant};

use super::async_job::{spawn_job, AsyncJob};
use super::helpers::{load_icon, IconCache};
use super::notifications::{NotificationLevel, Notifications};
use super::theme::{configure_style, AppTheme};

/// Pending edits in the settings window, applied on save
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SettingsForm {
    pub(crate) catalog_path: String,
    pub(crate) readiness_mode: ReadinessMode,
    pub(crate) refresh_secs: u64,
}

impl SettingsForm {
    fn from_config(config: &Config) -> Self {
        Self {
            catalog_path: match &config.catalog {
                catalog::CatalogSource::File(path) => path.display().to_string(),
                catalog::CatalogSource::Embedded => String::new(),
            },
            readiness_mode: config.readiness_mode,
            refresh_secs: config.refresh_interval.map(|d| d.as_secs()).unwrap_or(0),
        }
    }
}

/// Operation log lines kept for the settings window
const RECENT_LOG_LINES: usize = 20;

pub struct VaultdeskApp {
    pub(crate) config: Config,
    pub(crate) user_settings: UserSettings,
    pub(crate) theme: AppTheme,
    pub(crate) store: Store,
    pub(crate) navigator: Navigator,
    pub(crate) detail: Option<VaultDetailView>,
    pub(crate) vaults_job: Option<AsyncJob<Vec<Vault>>>,
    pub(crate) tokens_job: Option<AsyncJob<WalletSnapshot>>,
    /// Source the running jobs read from
    pub(crate) fetching_from: Option<catalog::CatalogSource>,
    /// Set when the source changed while a fetch was in flight
    pub(crate) refresh_queued: bool,
    pub(crate) notifications: Notifications,
    pub(crate) icons: IconCache,
    pub(crate) pending_navigation: Vec<NavigationRequest>,
    pub(crate) settings_form: SettingsForm,
    pub(crate) show_settings: bool,
    /// Tail of the operation log shown in the settings window, newest first
    pub(crate) recent_operations: Result<Vec<String>, String>,
    pub(crate) show_notifications: bool,
    pub(crate) last_refresh: Instant,
}

impl VaultdeskApp {
    fn new(config: Config, user_settings: UserSettings, ctx: &egui::Context) -> Self {
        let theme = AppTheme::default();
        configure_style(ctx, &theme);

        let mut app = Self::with_config(config, user_settings);
        app.theme = theme;
        app.start_refresh();
        app
    }

    /// Build the shell and enter the start route without touching the UI context
    pub(crate) fn with_config(config: Config, user_settings: UserSettings) -> Self {
        let start = match Route::parse(&config.start_path) {
            Ok(route) => route,
            Err(e) => {
                tracing::warn!("Ignoring start path '{}': {}", config.start_path, e);
                Route::Vaults
            }
        };
        let settings_form = SettingsForm::from_config(&config);

        let mut app = Self {
            config,
            user_settings,
            theme: AppTheme::default(),
            store: Store::new(),
            navigator: Navigator::new(start),
            detail: None,
            vaults_job: None,
            tokens_job: None,
            fetching_from: None,
            refresh_queued: false,
            notifications: Notifications::default(),
            icons: IconCache::default(),
            pending_navigation: Vec::new(),
            settings_form,
            show_settings: false,
            recent_operations: Ok(Vec::new()),
            show_notifications: false,
            last_refresh: Instant::now(),
        };
        app.enter_route(&start);
        app
    }

    pub(crate) fn is_refreshing(&self) -> bool {
        self.vaults_job.as_ref().is_some_and(AsyncJob::is_running)
            || self.tokens_job.as_ref().is_some_and(AsyncJob::is_running)
    }

    /// Start both catalog fetches; a resource already being fetched is left alone.
    /// If the source changed since the running fetch started, the refresh is
    /// queued and runs again once that fetch lands.
    pub(crate) fn start_refresh(&mut self) {
        self.last_refresh = Instant::now();
        let source = self.config.catalog.clone();
        let delay = self.config.fetch_delay;

        if self.is_refreshing() && self.fetching_from.as_ref() != Some(&source) {
            tracing::info!("Catalog source changed to {} during a fetch, queueing refresh", source.label());
            self.refresh_queued = true;
            return;
        }
        tracing::info!("Refreshing catalog from {}", source.label());
        self.fetching_from = Some(source.clone());

        if !self.vaults_job.as_ref().is_some_and(AsyncJob::is_running) {
            self.store.dispatch(StoreAction::VaultsFetchStarted);
            let source = source.clone();
            self.vaults_job = Some(spawn_job(move || async move {
                Ok(catalog::fetch_vaults(&source, delay).await?)
            }));
        }
        if !self.tokens_job.as_ref().is_some_and(AsyncJob::is_running) {
            self.store.dispatch(StoreAction::TokensFetchStarted);
            self.tokens_job = Some(spawn_job(move || async move {
                Ok(catalog::fetch_wallet_tokens(&source, delay).await?)
            }));
        }
    }

    fn poll_jobs(&mut self) {
        if let Some(result) = self.vaults_job.as_mut().and_then(AsyncJob::poll) {
            self.vaults_job = None;
            self.finish_vaults_fetch(result);
        }
        if let Some(result) = self.tokens_job.as_mut().and_then(AsyncJob::poll) {
            self.tokens_job = None;
            self.finish_tokens_fetch(result);
        }
        if self.refresh_queued && !self.is_refreshing() {
            self.refresh_queued = false;
            self.start_refresh();
        }
    }

    pub(crate) fn finish_vaults_fetch(&mut self, result: Result<Vec<Vault>>) {
        let result = result.map_err(|e| e.to_string());
        if let Err(e) = &result {
            self.notifications.error(format!("Failed to load vaults: {}", e));
        }
        self.store.dispatch(StoreAction::VaultsFetched(result));
    }

    pub(crate) fn finish_tokens_fetch(&mut self, result: Result<WalletSnapshot>) {
        let result = result.map_err(|e| e.to_string());
        if let Err(e) = &result {
            self.notifications.error(format!("Failed to load wallet balances: {}", e));
        }
        self.store.dispatch(StoreAction::TokensFetched(result));
    }

    fn maybe_auto_refresh(&mut self) {
        if let Some(interval) = self.config.refresh_interval {
            if self.last_refresh.elapsed() >= interval && !self.is_refreshing() {
                tracing::debug!("Auto refresh after {:?}", interval);
                self.start_refresh();
            }
        }
    }

    pub(crate) fn request_navigation(&mut self, request: NavigationRequest) {
        self.pending_navigation.push(request);
    }

    /// Apply navigation requested by the shell and by the detail view this frame
    pub(crate) fn process_navigation(&mut self) {
        let mut requests = std::mem::take(&mut self.pending_navigation);
        if let Some(detail) = self.detail.as_mut() {
            requests.extend(detail.take_navigation_requests());
        }
        for request in requests {
            match self.navigator.apply(&request) {
                Ok(route) => self.enter_route(&route),
                Err(e) => self.notifications.error(format!("Cannot navigate to {}: {}", request.path, e)),
            }
        }
    }

    /// Alt+Left walks back through the navigation history
    fn handle_history_shortcut(&mut self, ctx: &egui::Context) {
        let back = ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowLeft));
        if back {
            if let Some(route) = self.navigator.back() {
                self.enter_route(&route);
            }
        }
    }

    /// Leaving a detail route drops its view, which releases its subscription.
    /// Every entry into a detail route mounts a fresh view.
    fn enter_route(&mut self, route: &Route) {
        match route {
            Route::Vaults => {
                self.detail = None;
            }
            Route::VaultDetail(address) => {
                self.store.dispatch(StoreAction::SelectVault(Some(*address)));
                self.detail = Some(VaultDetailView::mount(&mut self.store, self.config.readiness_mode));
            }
        }
    }

    /// Record a validated transaction in the store and the operation log
    pub(crate) fn stage_transaction(&mut self, intent: TxIntent) {
        if let Err(e) = operation_log::log_staged_transaction(&intent, self.config.chain_id) {
            self.notifications.error(format!("Failed to write operation log: {}", e));
        }
        self.notifications.success(format!(
            "Staged {} for {}",
            intent.kind.label(),
            intent.vault_name
        ));
        self.store.dispatch(StoreAction::StageTransaction(intent));
        self.reload_recent_operations();
    }

    /// Re-read the operation log tail shown in the settings window
    pub(crate) fn reload_recent_operations(&mut self) {
        self.recent_operations =
            operation_log::read_recent(RECENT_LOG_LINES).map_err(|e| e.to_string());
    }

    /// Persist the settings window and apply it to the running session
    pub(crate) fn apply_settings(&mut self) {
        let form = self.settings_form.clone();
        self.user_settings.set_catalog_path(&form.catalog_path);
        self.user_settings.readiness_mode = Some(form.readiness_mode);
        self.user_settings.refresh_interval_secs = Some(form.refresh_secs);
        if form.catalog_path.trim().is_empty() {
            self.config.catalog = catalog::CatalogSource::Embedded;
        }
        self.config.apply_user_settings(&self.user_settings);

        match self.user_settings.save() {
            Ok(()) => self.notifications.success("Settings saved"),
            Err(e) => self.notifications.error(format!("Failed to save settings: {}", e)),
        }

        // The readiness mode is fixed at mount, so an open detail page is remounted
        if let Route::VaultDetail(_) = self.navigator.current() {
            let current = self.navigator.current();
            self.enter_route(&current);
        }
        self.start_refresh();
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("Vaultdesk")
                    .size(self.theme.title_size)
                    .strong()
                    .color(self.theme.secondary),
            );
            ui.label(RichText::new(format!("v{}", env!("CARGO_PKG_VERSION"))).small().color(self.theme.text_secondary));
            ui.separator();
            ui.label(RichText::new(self.config.network_label()).color(self.theme.text_secondary));
            ui.separator();
            ui.label(RichText::new(self.navigator.current().path()).monospace().color(self.theme.text_secondary));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Settings").clicked() {
                    self.settings_form = SettingsForm::from_config(&self.config);
                    self.reload_recent_operations();
                    self.show_settings = true;
                }
                let bell = format!("Notifications ({})", self.notifications.len());
                if ui.button(bell).clicked() {
                    self.show_notifications = !self.show_notifications;
                }
                if self.is_refreshing() {
                    ui.spinner();
                }
            });
        });
        ui.add_space(8.0);
    }

    fn render_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| match self.notifications.latest() {
            Some(entry) => {
                let color = match entry.level {
                    NotificationLevel::Error => self.theme.error,
                    NotificationLevel::Success => self.theme.success,
                    NotificationLevel::Info => self.theme.text_secondary,
                };
                ui.label(RichText::new(&entry.message).color(color));
                ui.label(RichText::new(entry.time_ago()).small().color(self.theme.text_secondary));
            }
            None => {
                ui.label(RichText::new("Ready").color(self.theme.text_secondary));
            }
        });
    }

    fn render_notifications_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_notifications;
        let mut clear = false;
        egui::Window::new("Notifications")
            .open(&mut open)
            .default_width(420.0)
            .show(ctx, |ui| {
                if self.notifications.is_empty() {
                    ui.label(RichText::new("Nothing yet").color(self.theme.text_secondary));
                }
                for entry in self.notifications.iter_recent() {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(entry.time_ago()).small().color(self.theme.text_secondary));
                        ui.label(entry.message.as_str());
                    });
                }
                if !self.notifications.is_empty() && ui.button("Clear").clicked() {
                    clear = true;
                }
            });
        if clear {
            self.notifications.clear();
        }
        self.show_notifications = open;
    }
}

impl App for VaultdeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_jobs();
        self.maybe_auto_refresh();
        self.handle_history_shortcut(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| self.render_top_bar(ui));
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| self.render_status_bar(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.navigator.current() {
                Route::Vaults => self.view_vault_list(ui),
                Route::VaultDetail(_) => self.view_vault_detail(ui),
            });
        });

        if self.show_settings {
            self.view_settings(ctx);
        }
        if self.show_notifications {
            self.render_notifications_window(ctx);
        }

        self.process_navigation();

        if self.is_refreshing() {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else if let Some(interval) = self.config.refresh_interval {
            ctx.request_repaint_after(interval.saturating_sub(self.last_refresh.elapsed()));
        }
    }
}

pub fn launch(mut config: Config) -> Result<()> {
    // Saved settings override the environment
    let user_settings = UserSettings::load();
    config.apply_user_settings(&user_settings);

    let app_creator = move |cc: &eframe::CreationContext<'_>| {
        Box::new(VaultdeskApp::new(config.clone(), user_settings.clone(), &cc.egui_ctx)) as Box<dyn App>
    };

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1240.0, 820.0])
        .with_min_inner_size([720.0, 480.0])
        .with_icon(std::sync::Arc::new(load_icon()));

    let native_options = NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native("Vaultdesk - Vault Dashboard", native_options, Box::new(app_creator))
        .map_err(|e| anyhow!("Failed to start GUI: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detail::BodyBranch;
    use crate::store::select_selected_vault;
    use crate::test_helpers::sample_vault;

    fn quiet_config() -> Config {
        Config {
            fetch_delay: Duration::ZERO,
            ..Config::default()
        }
    }

    fn wait_for_jobs(app: &mut VaultdeskApp) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.is_refreshing() {
            assert!(Instant::now() < deadline, "catalog jobs did not finish");
            app.poll_jobs();
            std::thread::sleep(Duration::from_millis(5));
        }
        app.poll_jobs();
    }

    // ==== routing tests ====

    #[test]
    fn test_unknown_start_path_falls_back_to_list() {
        let config = Config {
            start_path: "/nowhere".into(),
            ..quiet_config()
        };
        let app = VaultdeskApp::with_config(config, UserSettings::default());
        assert_eq!(app.navigator.current(), Route::Vaults);
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_start_on_detail_route_selects_vault() {
        let vault = sample_vault();
        let config = Config {
            start_path: Route::VaultDetail(vault.address).path(),
            ..quiet_config()
        };
        let app = VaultdeskApp::with_config(config, UserSettings::default());
        assert!(app.detail.is_some());
        assert_eq!(app.store.state().vaults.selected, Some(vault.address));
    }

    #[test]
    fn test_back_navigation_unmounts_detail() {
        let vault = sample_vault();
        let mut app = VaultdeskApp::with_config(quiet_config(), UserSettings::default());
        app.request_navigation(NavigationRequest::to(&Route::VaultDetail(vault.address)));
        app.process_navigation();
        assert!(app.detail.is_some());
        assert_eq!(app.store.subscriber_count(), 1);

        if let Some(detail) = app.detail.as_mut() {
            detail.go_back();
        }
        app.process_navigation();
        assert_eq!(app.navigator.current(), Route::Vaults);
        assert!(app.detail.is_none());

        // the dropped subscription is pruned on the next flip
        app.store.dispatch(StoreAction::VaultsFetchStarted);
        assert_eq!(app.store.subscriber_count(), 0);
    }

    #[test]
    fn test_bad_navigation_is_reported() {
        let mut app = VaultdeskApp::with_config(quiet_config(), UserSettings::default());
        app.request_navigation(NavigationRequest { path: "/vault/0x12".into() });
        app.process_navigation();
        assert_eq!(app.navigator.current(), Route::Vaults);
        assert_eq!(app.notifications.latest().map(|n| n.level), Some(NotificationLevel::Error));
    }

    // ==== fetch tests ====

    #[test]
    fn test_refresh_loads_catalog_and_shows_detail() {
        let vault = sample_vault();
        let mut app = VaultdeskApp::with_config(quiet_config(), UserSettings::default());
        app.request_navigation(NavigationRequest::to(&Route::VaultDetail(vault.address)));
        app.process_navigation();

        app.start_refresh();
        assert!(app.store.state().vaults.status.loading);
        wait_for_jobs(&mut app);

        let detail = app.detail.as_mut().unwrap();
        detail.sync();
        assert_eq!(detail.branch(app.store.state()), BodyBranch::Content);
        assert_eq!(select_selected_vault(app.store.state()).map(|v| v.address), Some(vault.address));
    }

    #[test]
    fn test_source_change_during_fetch_refreshes_again() {
        let mut switched = catalog::parse_catalog(catalog::SAMPLE_CATALOG).unwrap();
        switched.vaults.truncate(1);
        switched.vaults[0].display_name = "Switched".into();
        let path = std::env::temp_dir().join(format!("vaultdesk_switched_{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&switched).unwrap()).unwrap();

        let mut app = VaultdeskApp::with_config(quiet_config(), UserSettings::default());
        app.start_refresh();
        assert!(app.is_refreshing());

        app.config.catalog = catalog::CatalogSource::File(path.clone());
        app.start_refresh();
        assert!(app.refresh_queued);

        // landing the embedded catalog starts the queued fetch, which is awaited too
        wait_for_jobs(&mut app);

        assert!(!app.refresh_queued);
        assert_eq!(app.fetching_from, Some(catalog::CatalogSource::File(path.clone())));
        let vaults = &app.store.state().vaults.items;
        assert_eq!(vaults.len(), 1);
        assert_eq!(vaults[0].display_name, "Switched");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_same_source_refresh_is_not_queued() {
        let mut app = VaultdeskApp::with_config(quiet_config(), UserSettings::default());
        app.start_refresh();
        app.start_refresh();
        assert!(!app.refresh_queued);
        wait_for_jobs(&mut app);
        assert_eq!(app.store.state().vaults.items.len(), 3);
    }

    #[test]
    fn test_failed_fetch_notifies_and_clears_loading() {
        let mut app = VaultdeskApp::with_config(quiet_config(), UserSettings::default());
        app.store.dispatch(StoreAction::VaultsFetchStarted);
        app.finish_vaults_fetch(Err(anyhow!("catalog unreachable")));

        let status = &app.store.state().vaults.status;
        assert!(!status.loading);
        assert!(status.error.as_deref().unwrap_or_default().contains("catalog unreachable"));
        assert!(app.notifications.latest().unwrap().message.contains("Failed to load vaults"));
    }
}
