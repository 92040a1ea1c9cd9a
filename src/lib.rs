//! Claude Code stop hook that decides whether the assistant may end its turn.
//!
//! The transcript is loaded, cut down to the most recent turns, and handed to
//! a fixed battery of pattern detectors. The first detector that objects
//! blocks the stop; any failure along the way allows it.

pub mod config;
pub mod decision;
pub mod detectors;
pub mod error;
pub mod hook;
pub mod patterns;
pub mod transcript;
pub mod window;

pub use config::Settings;
pub use decision::{analyze_transcript, DecisionEngine, SessionDecision};
pub use error::{HookError, Result};
pub use hook::{handle_stop, HookInput, HookOutput};
