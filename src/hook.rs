//! Host-facing side of the stop hook: the stdin payload, the stdout verdict
//! and the exit code.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::Settings;
use crate::decision::{self, SessionDecision};
use crate::error::Result;

/// Exit code telling the host the stop may proceed.
pub const EXIT_ALLOW: u8 = 0;
/// Exit code telling the host to keep the assistant going.
pub const EXIT_BLOCK: u8 = 2;

const CONTINUE_INSTRUCTION: &str =
    "Please complete the current task or explicitly tell me if you want to stop here.";

/// Input received from Claude Code via stdin
#[derive(Debug, Default, Deserialize)]
pub struct HookInput {
    pub session_id: Option<String>,
    pub transcript_path: Option<String>,
    pub hook_event_name: Option<String>,
    pub stop_hook_active: Option<bool>,
}

impl HookInput {
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Output to control Claude's behavior
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HookOutput {
    pub decision: String,
    pub reason: String,
}

impl HookOutput {
    pub fn block(reason: &str) -> Self {
        Self {
            decision: "block".to_string(),
            reason: format!("⚠️ {reason}\n\n{CONTINUE_INSTRUCTION}"),
        }
    }
}

/// Expand ~ to home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") || path.starts_with("~\\") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Decide on a raw stdin payload.
///
/// Only a payload that is not valid JSON is an error; every other problem
/// allows the stop.
pub fn handle_stop(raw_input: &str, settings: &Settings) -> Result<SessionDecision> {
    let input = HookInput::parse(raw_input)?;
    tracing::debug!(
        session = input.session_id.as_deref().unwrap_or("unknown"),
        event = input.hook_event_name.as_deref().unwrap_or("unknown"),
        "stop hook invoked"
    );

    // Prevent infinite loops - if stop_hook_active is true, allow stop
    if input.stop_hook_active.unwrap_or(false) {
        return Ok(SessionDecision::allow());
    }

    let raw_path = input.transcript_path.unwrap_or_default();
    let transcript_path = expand_path(&raw_path);
    if raw_path.is_empty() || !transcript_path.is_file() {
        tracing::warn!("Transcript not found: {raw_path}");
        return Ok(SessionDecision::allow());
    }

    Ok(decision::analyze_transcript(&transcript_path, settings))
}

/// Write the verdict for the host and return the exit code to use.
pub fn emit<W: Write>(decision: &SessionDecision, out: &mut W) -> io::Result<u8> {
    if decision.allow {
        return Ok(EXIT_ALLOW);
    }

    let output = HookOutput::block(&decision.reason);
    let json = serde_json::to_string(&output).map_err(io::Error::other)?;
    writeln!(out, "{json}")?;
    Ok(EXIT_BLOCK)
}
