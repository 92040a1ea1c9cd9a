//! Pattern tables used by the detectors.
//!
//! Each table is plain data: a list of regexes plus a case rule. A table is
//! compiled into a [`RegexSet`] on first use and never changes afterwards.

use regex::{RegexSet, RegexSetBuilder};
use std::sync::OnceLock;

/// A named list of regexes matched as one set.
pub struct PatternTable {
    name: &'static str,
    patterns: &'static [&'static str],
    case_insensitive: bool,
    compiled: OnceLock<RegexSet>,
}

impl PatternTable {
    pub const fn new(
        name: &'static str,
        patterns: &'static [&'static str],
        case_insensitive: bool,
    ) -> Self {
        Self {
            name,
            patterns,
            case_insensitive,
            compiled: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn patterns(&self) -> &'static [&'static str] {
        self.patterns
    }

    fn set(&self) -> &RegexSet {
        self.compiled.get_or_init(|| {
            RegexSetBuilder::new(self.patterns)
                .case_insensitive(self.case_insensitive)
                .build()
                .unwrap_or_else(|e| panic!("invalid regex in pattern table {}: {e}", self.name))
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.set().is_match(text)
    }

    /// Source patterns that hit `text`, for diagnostics.
    pub fn matching(&self, text: &str) -> Vec<&'static str> {
        self.set()
            .matches(text)
            .into_iter()
            .map(|i| self.patterns[i])
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Todo status
// ---------------------------------------------------------------------------

pub static TODO_OPEN: PatternTable = PatternTable::new(
    "todo_open",
    &[
        r#""status":\s*"in_progress""#,
        r#""status":\s*"pending""#,
        r"\[in_progress\]",
        r"\[pending\]",
        r"marking.*as in_progress",
        r"Let me start by",
        r"Let me continue with",
        r"Now let me",
        r"I'll start by",
        r"I'll continue",
        r"TodoWrite.*in_progress",
        r"TodoWrite.*pending",
    ],
    true,
);

pub static TODO_DONE: PatternTable = PatternTable::new(
    "todo_done",
    &[
        r#""status":\s*"completed""#,
        r"\[completed\]",
        r"marking.*as completed",
        r"All.*completed",
        r"Successfully completed",
        r"Task.*finished",
        r"Work.*done",
    ],
    true,
);

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Case-sensitive; the useful spellings are listed one by one.
pub static ERROR: PatternTable = PatternTable::new(
    "error",
    &[
        r"error:",
        r"Error:",
        r"ERROR",
        r"failed",
        r"Failed",
        r"FAILED",
        r"exception",
        r"Exception",
        r"traceback",
        r"Traceback",
        r"command not found",
        r"permission denied",
        r"cannot find",
        r"unable to",
    ],
    false,
);

pub static RESOLUTION: PatternTable = PatternTable::new(
    "resolution",
    &[
        r"fixed",
        r"resolved",
        r"addressed",
        r"corrected",
        r"successfully",
        r"working now",
        r"should work",
    ],
    true,
);

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

pub static QUESTION: PatternTable = PatternTable::new(
    "question",
    &[
        r"\?\s*$",
        r"Would you like",
        r"Do you want",
        r"Should I",
        r"Shall I",
        r"Would you prefer",
        r"Please.*confirm",
        r"Please.*let me know",
        r"What.*would you",
        r"How.*would you",
    ],
    false,
);

// ---------------------------------------------------------------------------
// Mid-task language
// ---------------------------------------------------------------------------

pub static TASK_CONTINUING: PatternTable = PatternTable::new(
    "task_continuing",
    &[
        r"I'm going to",
        r"I'll now",
        r"Let me now",
        r"Next,? I",
        r"Now I need to",
        r"I should now",
        r"I need to",
        r"Let's start",
        r"Starting to",
        r"Beginning to",
        r"I'll begin",
        r"First,? I",
        r"I'll check",
        r"Let me check",
        r"I'll investigate",
        r"Let me search",
        r"Searching for",
        r"Looking for",
    ],
    true,
);

pub static TASK_COMPLETE: PatternTable = PatternTable::new(
    "task_complete",
    &[
        r"I've completed",
        r"I've finished",
        r"completed all",
        r"finished all",
        r"Everything.*done",
        r"All.*implemented",
        r"Successfully.*completed",
        r"Task.*complete",
        r"Implementation.*complete",
        r"Work.*finished",
    ],
    true,
);

pub static ALL: [&PatternTable; 7] = [
    &TODO_OPEN,
    &TODO_DONE,
    &ERROR,
    &RESOLUTION,
    &QUESTION,
    &TASK_CONTINUING,
    &TASK_COMPLETE,
];
