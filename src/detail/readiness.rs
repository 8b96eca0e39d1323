//! Spinner/content gating for the vault detail view.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How tracker state gates the content.
///
/// `Lenient` shows the spinner only while a resource is loading and not yet
/// initialized, so a store that was already loaded before the view mounted
/// shows content immediately. `Strict` additionally requires both resources
/// to have completed a load observed by this view, unless no vault is
/// selected and nothing is in flight, in which case the body stays blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessMode {
    #[default]
    Lenient,
    Strict,
}

impl ReadinessMode {
    pub const ALL: [ReadinessMode; 2] = [ReadinessMode::Lenient, ReadinessMode::Strict];

    pub fn as_str(self) -> &'static str {
        match self {
            ReadinessMode::Lenient => "lenient",
            ReadinessMode::Strict => "strict",
        }
    }
}

impl fmt::Display for ReadinessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown readiness mode '{0}' (expected 'lenient' or 'strict')")]
pub struct UnknownReadinessMode(pub String);

impl FromStr for ReadinessMode {
    type Err = UnknownReadinessMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(ReadinessMode::Lenient),
            "strict" => Ok(ReadinessMode::Strict),
            other => Err(UnknownReadinessMode(other.to_string())),
        }
    }
}

/// Everything the gate looks at, captured for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadinessInputs {
    pub vaults_loading: bool,
    pub tokens_loading: bool,
    pub vaults_initialized: bool,
    pub tokens_initialized: bool,
}

impl ReadinessInputs {
    pub fn any_loading(&self) -> bool {
        self.vaults_loading || self.tokens_loading
    }

    pub fn all_initialized(&self) -> bool {
        self.vaults_initialized && self.tokens_initialized
    }

    pub fn ready(&self) -> bool {
        !self.any_loading() && self.all_initialized()
    }

    pub fn general_loading(&self) -> bool {
        self.any_loading() && !self.all_initialized()
    }
}

/// Which branch of the detail body is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyBranch {
    Spinner,
    Content,
    Blank,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadinessGate {
    mode: ReadinessMode,
}

impl ReadinessGate {
    pub fn new(mode: ReadinessMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ReadinessMode {
        self.mode
    }

    pub fn branch(&self, inputs: ReadinessInputs, has_vault: bool) -> BodyBranch {
        let waiting = match self.mode {
            ReadinessMode::Lenient => inputs.general_loading(),
            ReadinessMode::Strict if !has_vault => inputs.any_loading(),
            ReadinessMode::Strict => !inputs.ready(),
        };
        if waiting {
            BodyBranch::Spinner
        } else if has_vault {
            BodyBranch::Content
        } else {
            BodyBranch::Blank
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(vl: bool, tl: bool, vi: bool, ti: bool) -> ReadinessInputs {
        ReadinessInputs {
            vaults_loading: vl,
            tokens_loading: tl,
            vaults_initialized: vi,
            tokens_initialized: ti,
        }
    }

    #[test]
    fn test_ready_requires_idle_and_initialized() {
        assert!(inputs(false, false, true, true).ready());
        assert!(!inputs(true, false, true, true).ready());
        assert!(!inputs(false, false, true, false).ready());
    }

    #[test]
    fn test_lenient_spinner_only_while_loading() {
        let gate = ReadinessGate::new(ReadinessMode::Lenient);
        assert_eq!(gate.branch(inputs(true, false, false, false), true), BodyBranch::Spinner);
        assert_eq!(gate.branch(inputs(false, true, true, false), true), BodyBranch::Spinner);
        // refresh after both initialized keeps content on screen
        assert_eq!(gate.branch(inputs(true, true, true, true), true), BodyBranch::Content);
    }

    #[test]
    fn test_lenient_prewarmed_store_shows_content() {
        let gate = ReadinessGate::new(ReadinessMode::Lenient);
        assert_eq!(gate.branch(inputs(false, false, false, false), true), BodyBranch::Content);
    }

    #[test]
    fn test_strict_prewarmed_store_keeps_spinner() {
        let gate = ReadinessGate::new(ReadinessMode::Strict);
        assert_eq!(gate.branch(inputs(false, false, false, false), true), BodyBranch::Spinner);
        assert_eq!(gate.branch(inputs(false, false, true, true), true), BodyBranch::Content);
    }

    #[test]
    fn test_missing_vault_is_blank_when_not_waiting() {
        for mode in ReadinessMode::ALL {
            let gate = ReadinessGate::new(mode);
            assert_eq!(gate.branch(inputs(false, false, true, true), false), BodyBranch::Blank);
        }
    }

    #[test]
    fn test_strict_missing_vault_is_blank_when_idle() {
        let gate = ReadinessGate::new(ReadinessMode::Strict);
        assert_eq!(gate.branch(inputs(false, false, false, false), false), BodyBranch::Blank);
        assert_eq!(gate.branch(inputs(false, false, true, false), false), BodyBranch::Blank);
        // a fetch in flight still shows the spinner
        assert_eq!(gate.branch(inputs(false, true, true, false), false), BodyBranch::Spinner);
    }

    #[test]
    fn test_spinner_wins_over_missing_vault() {
        let gate = ReadinessGate::new(ReadinessMode::Lenient);
        assert_eq!(gate.branch(inputs(true, true, false, false), false), BodyBranch::Spinner);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Strict".parse::<ReadinessMode>(), Ok(ReadinessMode::Strict));
        assert_eq!(" lenient ".parse::<ReadinessMode>(), Ok(ReadinessMode::Lenient));
        assert!("eager".parse::<ReadinessMode>().is_err());
    }
}
