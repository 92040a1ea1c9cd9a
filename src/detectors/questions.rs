//! A question to the user that nobody answered.

use super::{Detector, DetectorVerdict};
use crate::patterns::QUESTION;
use crate::window::RecentWindow;

pub const REASON: &str = "Waiting for user response to a question.";

/// Looks only at the latest assistant turn. Earlier questions were either
/// answered or superseded by more assistant text.
pub struct PendingQuestion;

impl PendingQuestion {
    pub const NAME: &'static str = "questions";
}

impl Detector for PendingQuestion {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, window: &RecentWindow) -> DetectorVerdict {
        let Some((index, turn)) = window.last_assistant() else {
            return DetectorVerdict::allow();
        };

        if QUESTION.is_match(&turn.text) && !window.user_replied_after(index) {
            tracing::debug!(patterns = ?QUESTION.matching(&turn.text), "pending question");
            return DetectorVerdict::block(REASON);
        }
        DetectorVerdict::allow()
    }
}
