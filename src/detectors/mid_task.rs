//! Announcements of work that has not happened yet.

use super::{Detector, DetectorVerdict};
use crate::patterns::{TASK_COMPLETE, TASK_CONTINUING};
use crate::window::RecentWindow;

pub const REASON: &str = "Task appears to be in progress. Claude indicated more work to do.";

/// Checks the final turn when the assistant wrote it. Completion phrasing
/// wins over any continuation phrasing in the same turn.
pub struct MidTaskLanguage;

impl MidTaskLanguage {
    pub const NAME: &'static str = "mid_task";
}

impl Detector for MidTaskLanguage {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, window: &RecentWindow) -> DetectorVerdict {
        let Some(turn) = window.trailing_assistant() else {
            return DetectorVerdict::allow();
        };

        if TASK_COMPLETE.is_match(&turn.text) {
            return DetectorVerdict::allow();
        }
        if TASK_CONTINUING.is_match(&turn.text) {
            tracing::debug!(patterns = ?TASK_CONTINUING.matching(&turn.text), "task continuing");
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
        MidTaskLanguage.check(&RecentWindow::from(turns))
    }

    #[test]
    fn blocks_on_announced_work() {
        let verdict = check(vec![
            TranscriptEntry::user("Implement the feature"),
            TranscriptEntry::assistant("I'll now implement the authentication system."),
        ]);
        assert_eq!(verdict, DetectorVerdict::block(REASON));
    }

    #[test]
    fn completion_overrides_continuation() {
        let verdict = check(vec![TranscriptEntry::assistant(
            "I've completed the refactor. Next I would suggest adding benchmarks.",
        )]);
        assert!(verdict.allow);
    }

    #[test]
    fn earlier_announcement_is_not_considered() {
        let verdict = check(vec![
            TranscriptEntry::assistant("Let me implement this feature"),
            TranscriptEntry::assistant("I'm going to add tests"),
            TranscriptEntry::assistant("The feature works and is tested."),
        ]);
        assert!(verdict.allow);
    }

    #[test]
    fn user_turn_last_allows() {
        let verdict = check(vec![
            TranscriptEntry::assistant("I need to check the logs."),
            TranscriptEntry::user("never mind"),
        ]);
        assert!(verdict.allow);
    }
}
