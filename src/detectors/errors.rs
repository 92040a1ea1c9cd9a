//! Errors reported after the last fix.

use super::{Detector, DetectorVerdict};
use crate::patterns::{ERROR, RESOLUTION};
use crate::window::RecentWindow;

pub const REASON: &str = "Unresolved errors detected. Please address them before stopping.";

/// Compares the window position of the latest error-like assistant turn with
/// the latest resolution-like one. Only positions are compared: a turn that
/// matches both tables ties, and a tie allows.
pub struct UnresolvedErrors;

impl UnresolvedErrors {
    pub const NAME: &'static str = "errors";
}

impl Detector for UnresolvedErrors {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, window: &RecentWindow) -> DetectorVerdict {
        let mut last_error: Option<usize> = None;
        let mut last_resolution: Option<usize> = None;

        for (i, turn) in window.assistant_turns() {
            if ERROR.is_match(&turn.text) {
                last_error = Some(i);
            }
            if RESOLUTION.is_match(&turn.text) {
                last_resolution = Some(i);
            }
        }

        // None orders below every Some.
        if last_error.is_some() && last_error > last_resolution {
            return DetectorVerdict::block(REASON);
        }
        DetectorVerdict::allow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TranscriptEntry;

    fn check(turns: Vec<TranscriptEntry>) -> DetectorVerdict {
        UnresolvedErrors.check(&RecentWindow::from(turns))
    }

    #[test]
    fn blocks_on_unresolved_error() {
        let verdict = check(vec![
            TranscriptEntry::user("Run the tests"),
            TranscriptEntry::assistant("Running tests...\nError: Test failed - TypeError in test_function"),
        ]);
        assert_eq!(verdict, DetectorVerdict::block(REASON));
    }

    #[test]
    fn later_resolution_allows() {
        let verdict = check(vec![
            TranscriptEntry::user("Run the tests"),
            TranscriptEntry::assistant("Error: Test failed"),
            TranscriptEntry::assistant("I've fixed the error. Tests are now passing successfully."),
        ]);
        assert!(verdict.allow);
    }

    #[test]
    fn error_after_resolution_blocks() {
        let verdict = check(vec![
            TranscriptEntry::assistant("Fixed the config loader."),
            TranscriptEntry::user("and the build?"),
            TranscriptEntry::assistant("cargo: permission denied"),
        ]);
        assert!(verdict.is_block());
    }

    #[test]
    fn same_turn_error_and_fix_is_not_after() {
        let verdict = check(vec![TranscriptEntry::assistant(
            "Fixed the import. Then the next step failed.",
        )]);
        assert!(verdict.allow);
    }

    #[test]
    fn user_reported_errors_are_ignored() {
        let verdict = check(vec![
            TranscriptEntry::user("Error: it crashed"),
            TranscriptEntry::assistant("Looks fine on my side."),
        ]);
        assert!(verdict.allow);
    }
}
