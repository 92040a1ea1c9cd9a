//! Detector battery.
//!
//! Every detector looks at the same [`RecentWindow`] and votes independently.
//! A detector never sees another detector's verdict.

pub mod errors;
pub mod mid_task;
pub mod questions;
pub mod todos;

pub use errors::UnresolvedErrors;
pub use mid_task::MidTaskLanguage;
pub use questions::PendingQuestion;
pub use todos::TodoStatus;

use crate::window::RecentWindow;

/// One detector's vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectorVerdict {
    pub allow: bool,
    /// Empty when `allow` is true.
    pub reason: String,
}

impl DetectorVerdict {
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

    pub fn is_block(&self) -> bool {
        !self.allow
    }
}

/// A pure check over the recent window.
pub trait Detector {
    /// Stable identifier used in logs and in `disabled_detectors`.
    fn name(&self) -> &'static str;

    fn check(&self, window: &RecentWindow) -> DetectorVerdict;
}

/// Names accepted in `disabled_detectors`, in evaluation order.
pub const DETECTOR_NAMES: [&str; 4] = [
    TodoStatus::NAME,
    UnresolvedErrors::NAME,
    PendingQuestion::NAME,
    MidTaskLanguage::NAME,
];

/// The full battery in evaluation order.
pub fn battery() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(TodoStatus),
        Box::new(UnresolvedErrors),
        Box::new(PendingQuestion),
        Box::new(MidTaskLanguage),
    ]
}
