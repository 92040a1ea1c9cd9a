//! Open todo items without a matching completion.

use super::{Detector, DetectorVerdict};
use crate::patterns::{TODO_DONE, TODO_OPEN};
use crate::window::RecentWindow;

pub const REASON: &str = "Incomplete todos detected. Work appears to be in progress.";

/// Blocks when some assistant turn still reports open work and no assistant
/// turn in the window reports completion. Order inside the window is ignored.
pub struct TodoStatus;

impl TodoStatus {
    pub const NAME: &'static str = "todos";
}

impl Detector for TodoStatus {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, window: &RecentWindow) -> DetectorVerdict {
        let mut incomplete = false;
        let mut completed = false;

        for (_, turn) in window.assistant_turns() {
            incomplete |= TODO_OPEN.is_match(&turn.text);
            completed |= TODO_DONE.is_match(&turn.text);
        }

        if incomplete && !completed {
            return DetectorVerdict::block(REASON);
        }
        DetectorVerdict::allow()
    }
}
