//! The single mutation funnel for the slot buffer.
//!
//! Both input paths (direct keyboard characters and resolved T9 digit
//! presses) go through [`SlotEditor`] so the last-edit marker and the T9
//! cycle state can never drift apart from the buffer they describe.

use std::time::{Duration, Instant};

use crate::slots::SlotBuffer;
use crate::t9::{T9Action, T9Resolver};

/// Owns the buffer, the last-edit marker and the T9 cycle state.
#[derive(Debug)]
pub struct SlotEditor {
    buffer: SlotBuffer,
    last_edit: Option<usize>,
    t9: T9Resolver,
    initial: String,
}

impl SlotEditor {
    /// Create an editor pre-filled with `initial_word`.
    pub fn new(initial_word: &str, cycle_window: Duration) -> Self {
        Self {
            buffer: SlotBuffer::from_word(initial_word),
            last_edit: None,
            t9: T9Resolver::new(cycle_window),
            initial: initial_word.to_string(),
        }
    }

    pub fn buffer(&self) -> &SlotBuffer {
        &self.buffer
    }

    pub fn word(&self) -> String {
        self.buffer.word()
    }

    pub fn caret(&self) -> usize {
        self.buffer.first_empty_index()
    }

    pub fn is_full(&self) -> bool {
        self.buffer.is_full()
    }

    pub fn last_edit(&self) -> Option<usize> {
        self.last_edit
    }

    /// Restore the initial word.  The marker and the cycle state are cleared
    /// in the same step so a stale index can never survive a reset.
    pub fn reset(&mut self) {
        self.buffer = SlotBuffer::from_word(&self.initial);
        self.last_edit = None;
        self.t9.reset();
    }

    /// Direct keyboard path: append one alphanumeric character.
    ///
    /// Returns the filled index; `None` when the character is not
    /// alphanumeric or the buffer is full (both silent no-ops).
    pub fn type_char(&mut self, ch: char) -> Option<usize> {
        if !ch.is_ascii_alphanumeric() {
            return None;
        }
        let (next, idx) = self.buffer.append_first_empty(ch.to_ascii_lowercase());
        if let Some(i) = idx {
            self.buffer = next;
            self.last_edit = Some(i);
        }
        idx
    }

    /// Clear the right-most filled cell.  Returns the cleared index, `None`
    /// when the buffer was already empty.
    pub fn backspace(&mut self) -> Option<usize> {
        let (next, idx) = self.buffer.clear_last();
        if let Some(i) = idx {
            self.buffer = next;
            self.last_edit = Some(i);
        }
        idx
    }

    /// Keypad path: resolve a digit press through T9 and apply the result.
    ///
    /// Returns the affected index, or `None` when the press resolved to a
    /// no-op (unmapped key, delete on empty, append on full, cycle with no
    /// target).
    pub fn press_digit(&mut self, digit: char, long_press: bool, now: Instant) -> Option<usize> {
        let action = self
            .t9
            .press(digit, long_press, self.last_edit.is_some(), now)?;
        match action {
            T9Action::ClearLast => self.backspace(),
            T9Action::Append(ch) => {
                let (next, idx) = self.buffer.append_first_empty(ch);
                if let Some(i) = idx {
                    self.buffer = next;
                    self.last_edit = Some(i);
                }
                idx
            }
            T9Action::ReplaceLastEdited(ch) => {
                let idx = self.last_edit?;
                self.buffer = self.buffer.set_char(idx, ch);
                Some(idx)
            }
        }
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::t9::CYCLE_WINDOW;

    fn editor(word: &str) -> SlotEditor {
        SlotEditor::new(word, CYCLE_WINDOW)
    }

    #[test]
    fn starts_with_the_initial_word() {
        assert_eq!(editor("aside").word(), "aside");
    }

    #[test]
    fn typing_fills_and_backspace_clears() {
        let mut e = editor("");
        assert_eq!(e.type_char('A'), Some(0));
        assert_eq!(e.word(), "a", "typed characters are lowercased");
        assert_eq!(e.backspace(), Some(0));
        assert!(e.buffer().is_empty());
    }

    #[test]
    fn typing_punctuation_is_ignored() {
        let mut e = editor("");
        assert_eq!(e.type_char('!'), None);
        assert!(e.buffer().is_empty());
    }

    #[test]
    fn digit_cycle_replaces_last_edited_cell() {
        let mut e = editor("");
        let base = Instant::now();
        assert_eq!(e.press_digit('2', false, base), Some(0));
        assert_eq!(e.word(), "a");
        assert_eq!(
            e.press_digit('2', false, base + Duration::from_millis(100)),
            Some(0),
            "cycling must edit the same cell in place"
        );
        assert_eq!(e.word(), "b");
    }

    #[test]
    fn cycle_targets_keyboard_typed_cell_too() {
        // The marker is shared between the paths: a quick '2' after typing
        // 's' appends, but the marker moved to the appended cell.
        let mut e = editor("");
        let base = Instant::now();
        e.type_char('s');
        e.press_digit('2', false, base);
        assert_eq!(e.word(), "sa");
        e.press_digit('2', false, base + Duration::from_millis(100));
        assert_eq!(e.word(), "sb");
    }

    #[test]
    fn delete_press_updates_marker_to_cleared_index() {
        let mut e = editor("as");
        let now = Instant::now();
        assert_eq!(e.press_digit(crate::t9::DELETE_KEY, false, now), Some(1));
        assert_eq!(e.last_edit(), Some(1));
    }

    #[test]
    fn press_on_full_buffer_is_noop() {
        let mut e = editor("aside");
        assert_eq!(e.press_digit('2', false, Instant::now()), None);
        assert_eq!(e.word(), "aside");
    }

    #[test]
    fn reset_restores_word_and_clears_marker_and_cycle() {
        let mut e = editor("aside");
        let base = Instant::now();
        e.backspace();
        e.press_digit('2', false, base);
        e.reset();
        assert_eq!(e.word(), "aside");
        assert_eq!(e.last_edit(), None);
        // A quick repeat right after reset must append, not cycle: the
        // pending '2' cycle died with the reset.
        e.backspace();
        assert_eq!(
            e.press_digit('2', false, base + Duration::from_millis(100)),
            Some(4)
        );
        assert_eq!(e.word(), "asida");
    }
}
