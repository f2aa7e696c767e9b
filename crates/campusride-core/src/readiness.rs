//! Resource readiness tracking for the first-paint gate.
//!
//! The screen graph may render once every preloaded asset has resolved and
//! fonts have either loaded or failed. Leaving the splash screen is gated
//! separately by the splash timer.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What to do when a preloaded asset fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFailurePolicy {
    /// Keep waiting. The gate never opens and nothing renders.
    #[default]
    Stall,
    /// Count the failed asset as resolved, the way font errors are treated.
    Degrade,
}

/// A readiness signal from the asset loader, font loader or splash timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessSignal {
    AssetResolved(String),
    AssetFailed { asset: String, error: String },
    FontsLoaded,
    FontsFailed { error: String },
    SplashTimerElapsed,
}

/// Preloaded assets, each resolved independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetSet {
    pending: BTreeSet<String>,
    failed: BTreeMap<String, String>,
}

impl AssetSet {
    pub fn new<I, S>(assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pending: assets.into_iter().map(Into::into).collect(),
            failed: BTreeMap::new(),
        }
    }

    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.failed.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn resolve(&mut self, asset: &str) -> bool {
        self.pending.remove(asset)
    }

    fn fail(&mut self, asset: &str, error: &str) -> bool {
        if self.pending.remove(asset) {
            self.failed.insert(asset.to_string(), error.to_string());
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessState {
    assets: AssetSet,
    policy: AssetFailurePolicy,
    fonts_loaded: bool,
    fonts_errored: bool,
    splash_timer_elapsed: bool,
}

impl ReadinessState {
    pub fn new(assets: AssetSet, policy: AssetFailurePolicy) -> Self {
        Self {
            assets,
            policy,
            fonts_loaded: false,
            fonts_errored: false,
            splash_timer_elapsed: false,
        }
    }

    pub fn assets(&self) -> &AssetSet {
        &self.assets
    }

    /// True when every asset has resolved. Failed assets only count under
    /// [`AssetFailurePolicy::Degrade`].
    pub fn assets_loaded(&self) -> bool {
        self.assets.pending.is_empty()
            && (self.assets.failed.is_empty() || self.policy == AssetFailurePolicy::Degrade)
    }

    pub fn fonts_loaded(&self) -> bool {
        self.fonts_loaded
    }

    pub fn fonts_errored(&self) -> bool {
        self.fonts_errored
    }

    pub fn splash_timer_elapsed(&self) -> bool {
        self.splash_timer_elapsed
    }

    pub fn fonts_settled(&self) -> bool {
        self.fonts_loaded || self.fonts_errored
    }

    /// The render gate.
    pub fn can_render(&self) -> bool {
        self.assets_loaded() && self.fonts_settled()
    }

    /// Records a signal. Returns whether anything changed.
    pub fn apply(&mut self, signal: &ReadinessSignal) -> bool {
        match signal {
            ReadinessSignal::AssetResolved(asset) => {
                let changed = self.assets.resolve(asset);
                if !changed {
                    debug!(%asset, "ignoring resolution of unknown or settled asset");
                }
                changed
            }
            ReadinessSignal::AssetFailed { asset, error } => {
                let changed = self.assets.fail(asset, error);
                if changed {
                    warn!(%asset, %error, policy = ?self.policy, "asset failed to load");
                }
                changed
            }
            ReadinessSignal::FontsLoaded => !std::mem::replace(&mut self.fonts_loaded, true),
            ReadinessSignal::FontsFailed { error } => {
                warn!(%error, "font loading failed, continuing with system fonts");
                !std::mem::replace(&mut self.fonts_errored, true)
            }
            ReadinessSignal::SplashTimerElapsed => {
                !std::mem::replace(&mut self.splash_timer_elapsed, true)
            }
        }
    }
}
