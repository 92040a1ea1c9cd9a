//! Transcript loading.
//!
//! The host persists every session as JSONL. Two record shapes are understood:
//!
//! ```text
//! {"type":"assistant_message","content":"..."}
//! {"type":"assistant","message":{"role":"assistant","content":[{"type":"text","text":"..."}]}}
//! ```
//!
//! Anything else decodes to [`TurnKind::Other`] and is ignored downstream.

use serde::Deserialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{HookError, RecordError, Result};

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    User,
    Assistant,
    Other,
}

impl TurnKind {
    fn from_type(entry_type: Option<&str>) -> Self {
        match entry_type {
            Some("user_message" | "user") => TurnKind::User,
            Some("assistant_message" | "assistant") => TurnKind::Assistant,
            _ => TurnKind::Other,
        }
    }

    /// User and assistant entries are turns; everything else is bookkeeping.
    pub fn is_turn(self) -> bool {
        matches!(self, TurnKind::User | TurnKind::Assistant)
    }
}

/// One decoded line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub kind: TurnKind,
    pub text: String,
}

impl TranscriptEntry {
    pub fn new(kind: TurnKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(TurnKind::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(TurnKind::Assistant, text)
    }

    pub fn is_assistant(&self) -> bool {
        self.kind == TurnKind::Assistant
    }

    pub fn is_user(&self) -> bool {
        self.kind == TurnKind::User
    }
}

/// What to do with a line that is not a JSON object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLines {
    /// Drop the line and keep reading.
    #[default]
    Skip,
    /// Give up on the whole transcript.
    Abort,
}

/// Knobs for [`load`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub malformed_lines: MalformedLines,
    /// Only the last `n` non-blank lines are decoded when set.
    pub tail_lines: Option<usize>,
}

/// Raw JSONL record, every field optional.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "type")]
    entry_type: Option<String>,
    content: Option<Value>,
    message: Option<RawMessage>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    content: Option<Value>,
}

impl RawRecord {
    fn into_entry(self) -> TranscriptEntry {
        let mut kind = TurnKind::from_type(self.entry_type.as_deref());
        let content = self
            .content
            .or_else(|| self.message.and_then(|m| m.content));

        // The host logs tool output as user records; nobody typed those.
        if kind == TurnKind::User && content.as_ref().is_some_and(is_tool_results_only) {
            kind = TurnKind::Other;
        }

        let text = content.as_ref().map(render_content).unwrap_or_default();
        TranscriptEntry { kind, text }
    }
}

fn is_tool_results_only(content: &Value) -> bool {
    match content {
        Value::Array(blocks) => {
            !blocks.is_empty()
                && blocks
                    .iter()
                    .all(|block| block["type"].as_str() == Some("tool_result"))
        }
        _ => false,
    }
}

/// Flatten message content to plain text.
///
/// Text blocks keep their text. Tool calls become `<name> <input json>` so a
/// `TodoWrite` call still shows its todo statuses.
fn render_content(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Array(blocks) => blocks
            .iter()
            .filter_map(render_block)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}

fn render_block(block: &Value) -> Option<String> {
    match block {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => match block["type"].as_str()? {
            "text" => block["text"].as_str().map(String::from),
            "tool_use" => {
                let name = block["name"].as_str().unwrap_or("tool");
                Some(format!("{name} {}", block["input"]))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Decode one JSONL line.
pub fn parse_line(line: &str) -> std::result::Result<TranscriptEntry, serde_json::Error> {
    serde_json::from_str::<RawRecord>(line).map(RawRecord::into_entry)
}

/// Read and decode the transcript at `path`.
pub fn try_load(path: &Path, options: &LoadOptions) -> Result<Vec<TranscriptEntry>> {
    let file = File::open(path).map_err(|source| HookError::TranscriptUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    from_reader(BufReader::new(file), path, options)
}

/// Fail-soft variant of [`try_load`]: problems are logged and yield an empty
/// transcript, which downstream means "allow".
pub fn load(path: &Path, options: &LoadOptions) -> Vec<TranscriptEntry> {
    match try_load(path, options) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Error reading transcript: {e}");
            Vec::new()
        }
    }
}

/// Lines are split as raw bytes so one bad line cannot poison the rest;
/// only I/O failures make the transcript unavailable.
fn from_reader<R: BufRead>(
    reader: R,
    path: &Path,
    options: &LoadOptions,
) -> Result<Vec<TranscriptEntry>> {
    let mut lines = Vec::new();
    for (i, line) in reader.split(b'\n').enumerate() {
        let line = line.map_err(|source| HookError::TranscriptUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        if !line.iter().all(u8::is_ascii_whitespace) {
            lines.push((i + 1, line));
        }
    }

    decode(tail(lines, options.tail_lines), options.malformed_lines)
}

fn tail<T>(lines: Vec<T>, limit: Option<usize>) -> Vec<T> {
    let Some(limit) = limit else {
        return lines;
    };

    let mut last: VecDeque<T> = VecDeque::with_capacity(limit);
    for line in lines {
        if limit == 0 {
            break;
        }
        if last.len() == limit {
            last.pop_front();
        }
        last.push_back(line);
    }
    last.into()
}

fn decode_record(bytes: &[u8]) -> std::result::Result<TranscriptEntry, RecordError> {
    let line = std::str::from_utf8(bytes)?;
    Ok(parse_line(line)?)
}

fn decode(lines: Vec<(usize, Vec<u8>)>, policy: MalformedLines) -> Result<Vec<TranscriptEntry>> {
    let mut entries = Vec::with_capacity(lines.len());
    for (line_no, line) in lines {
        match decode_record(&line) {
            Ok(entry) => entries.push(entry),
            Err(source) => match policy {
                MalformedLines::Skip => {
                    tracing::debug!(line = line_no, "skipping malformed transcript line: {source}");
                }
                MalformedLines::Abort => {
                    return Err(HookError::MalformedRecord {
                        line: line_no,
                        source,
                    })
                }
            },
        }
    }
    Ok(entries)
}
