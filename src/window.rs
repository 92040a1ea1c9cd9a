//! Recent-window extraction.

use crate::transcript::TranscriptEntry;

/// Default number of turns the detectors look at.
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// The last few user/assistant turns, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentWindow {
    turns: Vec<TranscriptEntry>,
}

impl RecentWindow {
    /// Keep the last `limit` turn entries of `entries`, in log order.
    pub fn extract(entries: &[TranscriptEntry], limit: usize) -> Self {
        let mut turns: Vec<TranscriptEntry> = entries
            .iter()
            .rev()
            .filter(|e| e.kind.is_turn())
            .take(limit)
            .cloned()
            .collect();
        turns.reverse();
        Self { turns }
    }

    pub fn turns(&self) -> &[TranscriptEntry] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Assistant turns paired with their position in the window.
    pub fn assistant_turns(&self) -> impl Iterator<Item = (usize, &TranscriptEntry)> {
        self.turns.iter().enumerate().filter(|(_, t)| t.is_assistant())
    }

    /// The most recent assistant turn and its position.
    pub fn last_assistant(&self) -> Option<(usize, &TranscriptEntry)> {
        self.assistant_turns().last()
    }

    /// The final turn, but only if the assistant wrote it.
    pub fn trailing_assistant(&self) -> Option<&TranscriptEntry> {
        self.turns.last().filter(|t| t.is_assistant())
    }

    /// True if a user turn appears anywhere after `index`.
    pub fn user_replied_after(&self, index: usize) -> bool {
        self.turns.iter().skip(index + 1).any(TranscriptEntry::is_user)
    }
}

impl From<Vec<TranscriptEntry>> for RecentWindow {
    fn from(turns: Vec<TranscriptEntry>) -> Self {
        Self::extract(&turns, turns.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TurnKind;

    #[test]
    fn keeps_last_n_turns_in_order() {
        let entries: Vec<_> = (0..15)
            .map(|i| TranscriptEntry::user(format!("m{i}")))
            .collect();
        let window = RecentWindow::extract(&entries, DEFAULT_WINDOW_SIZE);

        assert_eq!(window.len(), 10);
        assert_eq!(window.turns()[0].text, "m5");
        assert_eq!(window.turns()[9].text, "m14");
    }

    #[test]
    fn ignores_non_turn_entries() {
        let entries = vec![
            TranscriptEntry::user("a"),
            TranscriptEntry::new(TurnKind::Other, "summary"),
            TranscriptEntry::assistant("b"),
            TranscriptEntry::new(TurnKind::Other, ""),
        ];
        let window = RecentWindow::extract(&entries, 10);
        assert_eq!(
            window.turns(),
            &[TranscriptEntry::user("a"), TranscriptEntry::assistant("b")]
        );
    }

    #[test]
    fn shorter_logs_are_returned_whole() {
        let entries = vec![TranscriptEntry::assistant("only")];
        assert_eq!(RecentWindow::extract(&entries, 10).len(), 1);
        assert!(RecentWindow::extract(&[], 10).is_empty());
    }

    #[test]
    fn trailing_assistant_requires_assistant_last() {
        let window = RecentWindow::from(vec![
            TranscriptEntry::assistant("q?"),
            TranscriptEntry::user("yes"),
        ]);
        assert!(window.trailing_assistant().is_none());
        assert_eq!(window.last_assistant().map(|(i, _)| i), Some(0));
        assert!(window.user_replied_after(0));
        assert!(!window.user_replied_after(1));
    }
}
