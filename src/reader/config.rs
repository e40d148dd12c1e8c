use std::sync::Arc;

use crate::model::IonTransitionSettings;

/// Configuration for reading chromatogram containers
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Decode only scan summaries and fetch full scans on demand
    pub use_scan_proxies: bool,

    /// Reject overlapping or unordered baseline anchors instead of trusting them
    pub validate_baseline: bool,

    /// Registry that decoded ion transitions are interned into.
    /// A fresh registry is created per read when `None`.
    pub transitions: Option<Arc<IonTransitionSettings>>,
}

impl ReaderConfig {
    /// Enable or disable lazy scan proxies
    pub fn with_scan_proxies(mut self, enabled: bool) -> Self {
        self.use_scan_proxies = enabled;
        self
    }

    /// Enable or disable baseline validation
    pub fn with_baseline_validation(mut self, enabled: bool) -> Self {
        self.validate_baseline = enabled;
        self
    }

    /// Intern transitions into a shared registry
    pub fn with_transitions(mut self, transitions: Arc<IonTransitionSettings>) -> Self {
        self.transitions = Some(transitions);
        self
    }

    /// The configured registry, or a new empty one
    pub(crate) fn transition_registry(&self) -> Arc<IonTransitionSettings> {
        self.transitions
            .clone()
            .unwrap_or_else(|| Arc::new(IonTransitionSettings::new()))
    }
}
