//! Interactive token editing
//!
//! [`TokenEditor`] owns a [`TokenSequence`] and the transient edit state
//! around it. Editing happens on two independent axes:
//!
//! - the **token axis**: at most one existing token is "in edit mode" at a
//!   time, tracked by [`EditState`];
//! - the **gap axis**: each of the N+1 insertion gaps of an N-token sequence
//!   holds at most one pending input buffer.
//!
//! The two axes never interact except through the shared sequence. All
//! operations are synchronous and driven one discrete caller action at a
//! time; there is no internal locking because a single logical editor
//! instance owns the pair exclusively.

use crate::token::TokenSequence;

/// Token-axis edit state: either nothing is being edited, or exactly one
/// token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    /// No token is in edit mode
    #[default]
    Idle,
    /// The token at this index is being edited
    Editing(usize),
}

impl EditState {
    /// The index under edit, if any.
    pub fn editing_index(&self) -> Option<usize> {
        match self {
            EditState::Idle => None,
            EditState::Editing(i) => Some(*i),
        }
    }
}

/// Stateful editor over a token sequence.
///
/// Callers feed it discrete user actions (activate edit, keystroke text,
/// blur/Enter, backspace, gap input); the editor applies them to the
/// underlying [`TokenSequence`] while keeping the sequence well-formed
/// enough to submit for update at any commit point.
#[derive(Debug, Clone)]
pub struct TokenEditor {
    sequence: TokenSequence,
    state: EditState,
    gap_buffers: Vec<String>,
}

impl Default for TokenEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenEditor {
    /// Editor over an empty sequence (a brand-new rule).
    pub fn new() -> Self {
        Self::with_sequence(TokenSequence::new())
    }

    /// Editor over a stored rule's tokens.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self::with_sequence(TokenSequence::from_tokens(tokens))
    }

    fn with_sequence(sequence: TokenSequence) -> Self {
        let gap_buffers = vec![String::new(); sequence.len() + 1];
        Self {
            sequence,
            state: EditState::Idle,
            gap_buffers,
        }
    }

    /// The underlying sequence.
    pub fn sequence(&self) -> &TokenSequence {
        &self.sequence
    }

    /// Current token-axis state.
    pub fn state(&self) -> EditState {
        self.state
    }

    /// Number of insertion gaps (always sequence length + 1).
    pub fn gap_count(&self) -> usize {
        self.sequence.len() + 1
    }

    /// Pending input text for gap `gap` (empty if none).
    pub fn gap_text(&self, gap: usize) -> &str {
        self.gap_buffers.get(gap).map(String::as_str).unwrap_or("")
    }

    /// Replace the whole sequence after a server round trip.
    ///
    /// Forces the state back to [`EditState::Idle`] and clears every gap
    /// buffer, re-sized to the new sequence length + 1. Any in-progress
    /// edit or pending gap text is discarded.
    pub fn reset_from(&mut self, tokens: Vec<String>) {
        *self = Self::from_tokens(tokens);
    }

    /// The rule text the editor would submit right now.
    pub fn rule_text(&self) -> String {
        self.sequence.join()
    }

    // --- token axis ---------------------------------------------------

    /// Activate edit mode for the token at `index`.
    ///
    /// If another token is mid-edit its edit is committed first (blur fires
    /// before the activating click); `index` is then bounds-checked against
    /// the possibly shortened sequence and ignored when out of range.
    pub fn begin_edit(&mut self, index: usize) {
        if self.state != EditState::Idle {
            self.commit();
        }
        if index < self.sequence.len() {
            self.state = EditState::Editing(index);
        }
    }

    /// Overwrite the raw text of the token under edit. No-op when idle.
    pub fn edit_text(&mut self, text: &str) {
        if let EditState::Editing(index) = self.state {
            self.sequence.replace(index, text);
        }
    }

    /// Commit the in-progress token edit (blur or Enter).
    ///
    /// An emptied token is removed from the sequence; the state returns to
    /// idle either way. Returns `true` when a token was removed.
    pub fn commit(&mut self) -> bool {
        let removed = match self.state {
            EditState::Editing(index) => self.sequence.commit_edit(index),
            EditState::Idle => false,
        };
        self.state = EditState::Idle;
        removed
    }

    /// Backspace pressed while a token is in edit mode and its in-progress
    /// text is already empty: the token is deleted immediately and the
    /// editor returns to idle. Returns `true` when that deletion happened.
    ///
    /// With non-empty in-progress text, backspace is ordinary text entry;
    /// the caller expresses it through [`edit_text`](Self::edit_text) and
    /// this method does nothing.
    pub fn backspace(&mut self) -> bool {
        if let EditState::Editing(index) = self.state {
            if self.sequence.get(index).is_some_and(str::is_empty) {
                self.sequence.delete_at(index);
                self.state = EditState::Idle;
                return true;
            }
        }
        false
    }

    // --- gap axis ------------------------------------------------------

    /// Store pending insertion text for gap `gap`.
    ///
    /// Pending text is inert until [`commit_gap`](Self::commit_gap); gaps
    /// accept input independently of the token-axis state.
    pub fn gap_input(&mut self, gap: usize, text: &str) {
        if gap >= self.gap_buffers.len() {
            self.gap_buffers.resize(gap + 1, String::new());
        }
        self.gap_buffers[gap] = text.to_string();
    }

    /// Commit gap `gap` (blur or Enter on its input).
    ///
    /// Trimmed non-empty pending text becomes a new token at that gap.
    /// Afterwards ALL gap buffers are reset to empty, sized to the new
    /// sequence length + 1 - gap indices shift when the sequence grows.
    /// Returns `true` when a token was inserted.
    pub fn commit_gap(&mut self, gap: usize) -> bool {
        let pending = self.gap_text(gap).to_string();
        let inserted = if gap <= self.sequence.len() {
            self.sequence.insert_at(gap, &pending)
        } else {
            false
        };
        self.gap_buffers = vec![String::new(); self.sequence.len() + 1];
        inserted
    }

    /// Backspace pressed in gap `gap` while its pending buffer is already
    /// empty: purely a focus-release hint for the surrounding caller.
    /// Returns `true` when focus should be released. Never deletes a
    /// committed token and never changes the sequence.
    pub fn gap_backspace(&self, gap: usize) -> bool {
        self.gap_text(gap).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(tokens: &[&str]) -> TokenEditor {
        TokenEditor::from_tokens(tokens.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_starts_idle_with_one_gap_per_slot() {
        let e = editor(&["a", "AND", "b"]);
        assert_eq!(e.state(), EditState::Idle);
        assert_eq!(e.gap_count(), 4);
        assert_eq!(e.gap_text(0), "");
    }

    #[test]
    fn test_begin_edit_then_commit_keeps_token() {
        let mut e = editor(&["age", ">", "18"]);
        e.begin_edit(2);
        assert_eq!(e.state(), EditState::Editing(2));
        e.edit_text("21");
        assert!(!e.commit());
        assert_eq!(e.state(), EditState::Idle);
        assert_eq!(e.rule_text(), "age > 21");
    }

    #[test]
    fn test_commit_removes_emptied_token() {
        let mut e = editor(&["age", ">", "18"]);
        e.begin_edit(1);
        e.edit_text("  ");
        assert!(e.commit());
        assert_eq!(e.rule_text(), "age 18");
        assert_eq!(e.state(), EditState::Idle);
    }

    #[test]
    fn test_begin_edit_out_of_range_stays_idle() {
        let mut e = editor(&["a"]);
        e.begin_edit(5);
        assert_eq!(e.state(), EditState::Idle);
    }

    #[test]
    fn test_begin_edit_commits_previous_edit_first() {
        let mut e = editor(&["a", "b", "c"]);
        e.begin_edit(0);
        e.edit_text("");
        // Activating another token commits (and here removes) the first.
        e.begin_edit(1);
        assert_eq!(e.sequence().tokens(), &["b".to_string(), "c".to_string()]);
        assert_eq!(e.state(), EditState::Editing(1));
    }

    #[test]
    fn test_backspace_on_empty_token_deletes_it() {
        let mut e = editor(&["a", "AND", "b"]);
        e.begin_edit(1);
        e.edit_text("");
        assert!(e.backspace());
        assert_eq!(e.rule_text(), "a b");
        assert_eq!(e.state(), EditState::Idle);
    }

    #[test]
    fn test_backspace_on_nonempty_token_does_nothing() {
        let mut e = editor(&["a", "AND", "b"]);
        e.begin_edit(1);
        assert!(!e.backspace());
        assert_eq!(e.sequence().len(), 3);
        assert_eq!(e.state(), EditState::Editing(1));
    }

    #[test]
    fn test_backspace_when_idle_does_nothing() {
        let mut e = editor(&["a"]);
        assert!(!e.backspace());
        assert_eq!(e.sequence().len(), 1);
    }

    #[test]
    fn test_gap_commit_inserts_and_resizes_buffers() {
        let mut e = editor(&["a", "b"]);
        e.gap_input(1, " AND ");
        e.gap_input(2, "pending elsewhere");
        assert!(e.commit_gap(1));
        assert_eq!(e.rule_text(), "a AND b");
        assert_eq!(e.gap_count(), 4);
        // Every buffer is cleared, including the untouched ones.
        for gap in 0..e.gap_count() {
            assert_eq!(e.gap_text(gap), "");
        }
    }

    #[test]
    fn test_gap_commit_with_blank_pending_inserts_nothing() {
        let mut e = editor(&["a", "b"]);
        e.gap_input(0, "   ");
        assert!(!e.commit_gap(0));
        assert_eq!(e.sequence().len(), 2);
        assert_eq!(e.gap_text(0), "");
    }

    #[test]
    fn test_gap_backspace_is_only_a_focus_hint() {
        let mut e = editor(&["a", "b"]);
        assert!(e.gap_backspace(0));
        e.gap_input(1, "x");
        assert!(!e.gap_backspace(1));
        // Structurally nothing happened on either call.
        assert_eq!(e.sequence().len(), 2);
    }

    #[test]
    fn test_gap_axis_independent_of_token_axis() {
        let mut e = editor(&["a", "b"]);
        e.begin_edit(0);
        e.gap_input(2, "c");
        assert!(e.commit_gap(2));
        // Gap commit left the token edit alone... and the reverse holds.
        assert_eq!(e.state(), EditState::Editing(0));
        assert_eq!(e.rule_text(), "a b c");
    }

    #[test]
    fn test_reset_from_discards_all_transient_state() {
        let mut e = editor(&["a", "b"]);
        e.begin_edit(0);
        e.gap_input(1, "pending");
        e.reset_from(vec!["x".to_string(), "y".to_string(), "z".to_string()]);
        assert_eq!(e.state(), EditState::Idle);
        assert_eq!(e.gap_count(), 4);
        for gap in 0..e.gap_count() {
            assert_eq!(e.gap_text(gap), "");
        }
        assert_eq!(e.rule_text(), "x y z");
    }

    #[test]
    fn test_edit_round_for_new_rule() {
        // Build "age > 18 AND color = blue" from an empty editor, the way
        // a caller would: tail-gap inserts, one per action.
        let mut e = TokenEditor::new();
        for token in ["age", ">", "18", "AND", "color", "=", "blue"] {
            let tail = e.gap_count() - 1;
            e.gap_input(tail, token);
            assert!(e.commit_gap(tail));
        }
        assert_eq!(e.rule_text(), "age > 18 AND color = blue");
    }
}
