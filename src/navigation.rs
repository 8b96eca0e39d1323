//! Route parsing and the navigation history.

use ethers::types::Address;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

pub const VAULTS_PATH: &str = "/vaults";
const VAULT_DETAIL_PREFIX: &str = "/vault/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Vaults,
    VaultDetail(Address),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown route '{0}'")]
    Unknown(String),
    #[error("invalid vault address '{0}'")]
    BadAddress(String),
}

impl Route {
    pub fn parse(path: &str) -> Result<Route, RouteError> {
        let path = path.trim();
        let trimmed = path.trim_end_matches('/');
        if trimmed == VAULTS_PATH || trimmed.is_empty() {
            return Ok(Route::Vaults);
        }
        match trimmed.strip_prefix(VAULT_DETAIL_PREFIX) {
            Some(raw) => raw
                .parse::<Address>()
                .map(Route::VaultDetail)
                .map_err(|_| RouteError::BadAddress(raw.to_string())),
            None => Err(RouteError::Unknown(path.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Vaults => VAULTS_PATH.to_string(),
            Route::VaultDetail(address) => format!("{}{:?}", VAULT_DETAIL_PREFIX, address),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// An outbound request from a view, applied by the shell after the frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: String,
}

impl NavigationRequest {
    pub fn to(route: &Route) -> Self {
        Self { path: route.path() }
    }
}

/// Routes remembered for back navigation; the oldest entry is dropped first
const MAX_HISTORY: usize = 50;

/// Current route plus the routes visited before it
#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
    history: VecDeque<Route>,
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            history: VecDeque::new(),
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Push a route. Pushing the current route again is still recorded, so
    /// views keyed on entry are remounted.
    pub fn push(&mut self, route: Route) {
        tracing::info!(from = %self.current, to = %route, "navigate");
        if self.history.len() == MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(self.current);
        self.current = route;
    }

    pub fn back(&mut self) -> Option<Route> {
        let previous = self.history.pop_back()?;
        self.current = previous;
        Some(previous)
    }

    pub fn apply(&mut self, request: &NavigationRequest) -> Result<Route, RouteError> {
        let route = Route::parse(&request.path)?;
        self.push(route);
        Ok(route)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Vaults)
    }
}
