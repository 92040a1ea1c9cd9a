//! Combines the detector battery into one decision.

use std::path::Path;

use crate::config::Settings;
use crate::detectors::{self, Detector};
use crate::transcript;
use crate::window::RecentWindow;

/// Final answer for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDecision {
    pub allow: bool,
    pub reason: String,
}

impl SessionDecision {
    pub fn allow() -> Self {
        Self {
            allow: true,
            reason: String::new(),
        }
    }

    pub fn block(reason: impl Into<String>) -> Self {
        Self {
            allow: false,
            reason: reason.into(),
        }
    }
}

/// Runs detectors in order; the first block wins.
pub struct DecisionEngine {
    detectors: Vec<Box<dyn Detector>>,
    window_size: usize,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl DecisionEngine {
    pub fn from_settings(settings: &Settings) -> Self {
        let detectors = detectors::battery()
            .into_iter()
            .filter(|d| settings.is_enabled(d.name()))
            .collect();
        Self {
            detectors,
            window_size: settings.window_size,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn decide(&self, window: &RecentWindow) -> SessionDecision {
        for detector in &self.detectors {
            let verdict = detector.check(window);
            if verdict.is_block() {
                tracing::info!(detector = detector.name(), reason = %verdict.reason, "blocking stop");
                return SessionDecision::block(verdict.reason);
            }
        }
        SessionDecision::allow()
    }
}

/// Load the transcript at `path` and decide. Unreadable or empty transcripts
/// allow.
pub fn analyze_transcript(path: &Path, settings: &Settings) -> SessionDecision {
    let entries = transcript::load(path, &settings.load_options());
    if entries.is_empty() {
        return SessionDecision::allow();
    }

    let engine = DecisionEngine::from_settings(settings);
    let window = RecentWindow::extract(&entries, engine.window_size());
    tracing::debug!(
        entries = entries.len(),
        window = window.len(),
        "analyzing transcript"
    );
    engine.decide(&window)
}
