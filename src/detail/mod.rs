//! Vault detail view state
//!
//! `VaultDetailView` owns everything the detail page keeps between frames:
//! the two loading trackers, the tab controller, both transaction forms and
//! the outbound navigation requests. It reads the store by reference and
//! never writes to it; staged transactions are handed back to the caller.
//!
//! ## Module Structure
//!
//! - `tracker` - one-shot loading completion flags
//! - `readiness` - spinner/content/blank gating
//! - `tabs` - deposit/withdraw tab controller
//! - `tx_form` - deposit/withdraw form input and validation
//! - `layout` - render model built each frame

pub mod layout;
pub mod readiness;
pub mod tabs;
pub mod tracker;
pub mod tx_form;

pub use layout::{DetailBody, DetailLayout};
pub use readiness::{BodyBranch, ReadinessGate, ReadinessInputs, ReadinessMode};
pub use tabs::{TabController, TransactionTab};
pub use tracker::LoadTracker;
pub use tx_form::{FormStatus, TransactionForm, TxFormError};

use crate::navigation::{NavigationRequest, Route};
use crate::store::{
    select_selected_vault, select_vaults_status, select_wallet_tokens_status, Resource, StatusSubscription,
    Store, StoreState,
};
use crate::types::TxIntent;

pub struct VaultDetailView {
    vaults: LoadTracker,
    tokens: LoadTracker,
    tabs: TabController,
    gate: ReadinessGate,
    deposit: TransactionForm,
    withdraw: TransactionForm,
    subscription: Option<StatusSubscription>,
    outbox: Vec<NavigationRequest>,
}

impl VaultDetailView {
    /// Subscribe to status changes and observe the current statuses once
    pub fn mount(store: &mut Store, mode: ReadinessMode) -> Self {
        let subscription = store.subscribe();
        let mut view = Self {
            vaults: LoadTracker::new(),
            tokens: LoadTracker::new(),
            tabs: TabController::new(),
            gate: ReadinessGate::new(mode),
            deposit: TransactionForm::new(TransactionTab::Deposit.kind()),
            withdraw: TransactionForm::new(TransactionTab::Withdraw.kind()),
            subscription: Some(subscription),
            outbox: Vec::new(),
        };
        let state = store.state();
        view.observe(Resource::Vaults, select_vaults_status(state).loading);
        view.observe(Resource::Tokens, select_wallet_tokens_status(state).loading);
        tracing::debug!(mode = %mode, "vault detail view mounted");
        view
    }

    fn observe(&mut self, resource: Resource, loading: bool) {
        let tracker = match resource {
            Resource::Vaults => &mut self.vaults,
            Resource::Tokens => &mut self.tokens,
        };
        if tracker.observe(loading) {
            tracing::debug!(
                ?resource,
                first_fetch = tracker.first_fetch_observed(),
                initialized = tracker.is_initialized(),
                "loading tracker advanced"
            );
        }
    }

    /// Apply queued status changes. The subscription is dropped once both
    /// trackers are initialized since nothing can change them after that.
    pub fn sync(&mut self) -> usize {
        let changes = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => return 0,
        };
        for change in &changes {
            self.observe(change.resource, change.loading);
        }
        if self.vaults.is_initialized() && self.tokens.is_initialized() {
            self.subscription = None;
        }
        changes.len()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn vaults_tracker(&self) -> LoadTracker {
        self.vaults
    }

    pub fn tokens_tracker(&self) -> LoadTracker {
        self.tokens
    }

    pub fn readiness_mode(&self) -> ReadinessMode {
        self.gate.mode()
    }

    pub fn selected_tab(&self) -> TransactionTab {
        self.tabs.selected()
    }

    pub fn select_tab(&mut self, tab: TransactionTab) {
        self.tabs.select(tab);
    }

    pub fn form(&self, tab: TransactionTab) -> &TransactionForm {
        match tab {
            TransactionTab::Deposit => &self.deposit,
            TransactionTab::Withdraw => &self.withdraw,
        }
    }

    pub fn form_mut(&mut self, tab: TransactionTab) -> &mut TransactionForm {
        match tab {
            TransactionTab::Deposit => &mut self.deposit,
            TransactionTab::Withdraw => &mut self.withdraw,
        }
    }

    /// Validate and stage the form behind `tab` against the selected vault
    pub fn submit(&mut self, tab: TransactionTab, state: &StoreState) -> Option<TxIntent> {
        let vault = select_selected_vault(state)?;
        let form = self.form_mut(tab);
        let available = form.available(vault, state);
        form.submit(vault, available)
    }

    pub fn fill_max(&mut self, tab: TransactionTab, state: &StoreState) {
        if let Some(vault) = select_selected_vault(state) {
            let form = self.form_mut(tab);
            let available = form.available(vault, state);
            form.fill_max(vault, available);
        }
    }

    /// Request navigation back to the vault list
    pub fn go_back(&mut self) {
        tracing::info!("back to vaults requested");
        self.outbox.push(NavigationRequest::to(&Route::Vaults));
    }

    pub fn take_navigation_requests(&mut self) -> Vec<NavigationRequest> {
        std::mem::take(&mut self.outbox)
    }

    pub fn readiness(&self, state: &StoreState) -> ReadinessInputs {
        ReadinessInputs {
            vaults_loading: select_vaults_status(state).loading,
            tokens_loading: select_wallet_tokens_status(state).loading,
            vaults_initialized: self.vaults.is_initialized(),
            tokens_initialized: self.tokens.is_initialized(),
        }
    }

    pub fn branch(&self, state: &StoreState) -> BodyBranch {
        let has_vault = select_selected_vault(state).is_some();
        self.gate.branch(self.readiness(state), has_vault)
    }

    pub fn layout(&self, state: &StoreState) -> DetailLayout {
        DetailLayout::build(self.branch(state), select_selected_vault(state), &self.tabs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WalletSnapshot;
    use crate::store::StoreAction;
    use crate::test_helpers::{sample_vault, sample_wallet};
    use crate::types::{TxKind, Vault};

    fn select(store: &mut Store, vault: &Vault) {
        store.dispatch(StoreAction::SelectVault(Some(vault.address)));
    }

    fn finish_loads(store: &mut Store, vault: &Vault) {
        store.dispatch(StoreAction::VaultsFetched(Ok(vec![vault.clone()])));
        store.dispatch(StoreAction::TokensFetched(Ok(sample_wallet())));
    }

    fn start_loads(store: &mut Store) {
        store.dispatch(StoreAction::VaultsFetchStarted);
        store.dispatch(StoreAction::TokensFetchStarted);
    }

    #[test]
    fn test_full_load_cycle_reaches_content() {
        let vault = sample_vault();
        let mut store = Store::new();
        select(&mut store, &vault);
        let mut view = VaultDetailView::mount(&mut store, ReadinessMode::Lenient);

        start_loads(&mut store);
        view.sync();
        assert_eq!(view.layout(store.state()).body, DetailBody::Spinner);

        finish_loads(&mut store, &vault);
        view.sync();
        assert!(view.vaults_tracker().is_initialized());
        assert!(view.tokens_tracker().is_initialized());
        assert!(view.layout(store.state()).content().is_some());
        assert!(!view.is_subscribed());
    }

    #[test]
    fn test_spinner_hides_all_content_panels() {
        let vault = sample_vault();
        let mut store = Store::new();
        select(&mut store, &vault);
        store.dispatch(StoreAction::VaultsFetched(Ok(vec![vault])));
        store.dispatch(StoreAction::TokensFetchStarted);

        let mut view = VaultDetailView::mount(&mut store, ReadinessMode::Lenient);
        view.sync();
        let layout = view.layout(store.state());
        assert!(view.readiness(store.state()).general_loading());
        assert_eq!(layout.body, DetailBody::Spinner);
        assert!(layout.content().is_none());
    }

    #[test]
    fn test_missing_vault_renders_blank() {
        let mut store = Store::new();
        store.dispatch(StoreAction::VaultsFetched(Ok(vec![sample_vault()])));
        store.dispatch(StoreAction::TokensFetched(Ok(WalletSnapshot::default())));

        let view = VaultDetailView::mount(&mut store, ReadinessMode::Lenient);
        assert_eq!(view.layout(store.state()).body, DetailBody::Blank);
    }

    #[test]
    fn test_prewarmed_store_never_initializes() {
        let vault = sample_vault();
        let mut store = Store::new();
        select(&mut store, &vault);
        finish_loads(&mut store, &vault);

        let mut lenient = VaultDetailView::mount(&mut store, ReadinessMode::Lenient);
        let mut strict = VaultDetailView::mount(&mut store, ReadinessMode::Strict);
        lenient.sync();
        strict.sync();

        assert!(!lenient.vaults_tracker().is_initialized());
        assert!(lenient.layout(store.state()).content().is_some());
        assert_eq!(strict.layout(store.state()).body, DetailBody::Spinner);
        assert!(strict.is_subscribed());
    }

    #[test]
    fn test_strict_mode_without_selection_is_blank_on_prewarmed_store() {
        let vault = sample_vault();
        let mut store = Store::new();
        finish_loads(&mut store, &vault);

        let mut view = VaultDetailView::mount(&mut store, ReadinessMode::Strict);
        view.sync();

        assert!(!view.vaults_tracker().is_initialized());
        assert_eq!(view.layout(store.state()).body, DetailBody::Blank);
    }

    #[test]
    fn test_refresh_after_prewarm_unblocks_strict_mode() {
        let vault = sample_vault();
        let mut store = Store::new();
        select(&mut store, &vault);
        finish_loads(&mut store, &vault);
        let mut view = VaultDetailView::mount(&mut store, ReadinessMode::Strict);

        start_loads(&mut store);
        finish_loads(&mut store, &vault);
        assert_eq!(view.sync(), 4);
        assert!(view.layout(store.state()).content().is_some());
    }

    #[test]
    fn test_tab_switch_keeps_readiness_and_input() {
        let vault = sample_vault();
        let mut store = Store::new();
        select(&mut store, &vault);
        let mut view = VaultDetailView::mount(&mut store, ReadinessMode::Lenient);
        start_loads(&mut store);
        finish_loads(&mut store, &vault);
        view.sync();

        view.form_mut(TransactionTab::Deposit).amount_input = "42".into();
        view.select_tab(TransactionTab::Withdraw);
        view.select_tab(TransactionTab::Deposit);

        assert_eq!(view.selected_tab(), TransactionTab::Deposit);
        assert_eq!(view.form(TransactionTab::Deposit).amount_input, "42");
        assert!(view.vaults_tracker().is_initialized());
        assert!(view.tokens_tracker().is_initialized());

        let layout = view.layout(store.state());
        let panels = &layout.content().map(|c| c.actions.panels.clone()).unwrap_or_default();
        assert!(panels.iter().any(|p| p.tab == TransactionTab::Deposit && p.visible));
        assert!(panels.iter().any(|p| p.tab == TransactionTab::Withdraw && !p.visible));
    }

    #[test]
    fn test_back_issues_single_request() {
        let mut store = Store::new();
        store.dispatch(StoreAction::VaultsFetchStarted);
        let mut view = VaultDetailView::mount(&mut store, ReadinessMode::Strict);
        view.select_tab(TransactionTab::Withdraw);

        view.go_back();
        let requests = view.take_navigation_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/vaults");
        assert!(view.take_navigation_requests().is_empty());
    }

    #[test]
    fn test_submit_stages_against_selected_vault() {
        let vault = sample_vault();
        let mut store = Store::new();
        select(&mut store, &vault);
        finish_loads(&mut store, &vault);
        let mut view = VaultDetailView::mount(&mut store, ReadinessMode::Lenient);

        view.fill_max(TransactionTab::Deposit, store.state());
        assert_eq!(view.form(TransactionTab::Deposit).amount_input, "5400");

        let intent = view.submit(TransactionTab::Deposit, store.state()).unwrap();
        assert_eq!(intent.kind, TxKind::Deposit);
        assert_eq!(intent.vault, vault.address);
    }

    #[test]
    fn test_remount_resets_tab() {
        let mut store = Store::new();
        let mut view = VaultDetailView::mount(&mut store, ReadinessMode::Lenient);
        view.select_tab(TransactionTab::Withdraw);

        let view = VaultDetailView::mount(&mut store, ReadinessMode::Lenient);
        assert_eq!(view.selected_tab(), TransactionTab::Deposit);
    }
}
