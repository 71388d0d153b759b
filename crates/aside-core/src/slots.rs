//! The five-slot letter buffer: the canonical text state of the widget.

/// Number of character cells in the display buffer.
pub const MAX_LEN: usize = 5;

/// Fixed-capacity ordered sequence of optional characters.
///
/// Only lowercase ASCII letters and digits are ever stored.  All mutators
/// take `&self` and return a fresh buffer plus the affected index, so every
/// intermediate state stays independently inspectable.  Operating on a full
/// or empty buffer is a documented no-op returning `None` as the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBuffer {
    cells: [Option<char>; MAX_LEN],
}

impl SlotBuffer {
    /// An all-empty buffer.
    pub fn empty() -> Self {
        Self { cells: [None; MAX_LEN] }
    }

    /// Build a buffer pre-filled with `word`, truncated to [`MAX_LEN`].
    ///
    /// Characters are lowercased; anything that is not an ASCII letter or
    /// digit is skipped so the storage invariant holds for arbitrary input.
    pub fn from_word(word: &str) -> Self {
        let mut buf = Self::empty();
        let mut i = 0;
        for ch in word.chars() {
            if i >= MAX_LEN {
                break;
            }
            let ch = ch.to_ascii_lowercase();
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
                buf.cells[i] = Some(ch);
                i += 1;
            }
        }
        buf
    }

    /// The character in cell `index`, if any.
    pub fn cell(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied().flatten()
    }

    /// Index of the first empty cell — the caret position.  Returns
    /// [`MAX_LEN`] when the buffer is full (caret sits after the last cell).
    pub fn first_empty_index(&self) -> usize {
        self.cells
            .iter()
            .position(|c| c.is_none())
            .unwrap_or(MAX_LEN)
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// True when every cell is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Concatenation of the filled cells only.  Embedded gaps are skipped
    /// here (they only matter for display); trailing emptiness disappears,
    /// which is what mode-trigger matching wants.
    pub fn word(&self) -> String {
        self.cells.iter().flatten().collect()
    }

    /// Replace cell `index` with `ch` (lowercased).  Out-of-range indices
    /// leave the buffer unchanged.
    pub fn set_char(&self, index: usize, ch: char) -> SlotBuffer {
        let mut next = *self;
        if index < MAX_LEN {
            next.cells[index] = Some(ch.to_ascii_lowercase());
        }
        next
    }

    /// Fill the first empty cell scanning from the start.
    ///
    /// Returns the new buffer and the filled index, or `None` when the
    /// buffer was already full.
    pub fn append_first_empty(&self, ch: char) -> (SlotBuffer, Option<usize>) {
        let idx = self.first_empty_index();
        if idx == MAX_LEN {
            return (*self, None);
        }
        (self.set_char(idx, ch), Some(idx))
    }

    /// Clear the last non-empty cell scanning from the end.
    ///
    /// Returns the new buffer and the cleared index, or `None` when the
    /// buffer was already empty.
    pub fn clear_last(&self) -> (SlotBuffer, Option<usize>) {
        for i in (0..MAX_LEN).rev() {
            if self.cells[i].is_some() {
                let mut next = *self;
                next.cells[i] = None;
                return (next, Some(i));
            }
        }
        (*self, None)
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_word_fills_left_to_right() {
        let b = SlotBuffer::from_word("aside");
        assert_eq!(b.word(), "aside");
        assert!(b.is_full());
    }

    #[test]
    fn from_word_truncates_to_capacity() {
        let b = SlotBuffer::from_word("asides");
        assert_eq!(b.word(), "aside");
    }

    #[test]
    fn from_word_lowercases_and_skips_invalid_chars() {
        let b = SlotBuffer::from_word("A-S1!");
        assert_eq!(b.word(), "as1");
    }

    #[test]
    fn append_fills_left_to_right_and_full_after_fifth() {
        let mut b = SlotBuffer::empty();
        for (n, ch) in "aside".chars().enumerate() {
            assert!(!b.is_full(), "not full before append {n}");
            let (next, idx) = b.append_first_empty(ch);
            assert_eq!(idx, Some(n), "appends must fill strictly left to right");
            b = next;
        }
        assert!(b.is_full(), "full exactly after the 5th successful append");
    }

    #[test]
    fn append_on_full_buffer_is_noop() {
        let b = SlotBuffer::from_word("aside");
        let (next, idx) = b.append_first_empty('x');
        assert_eq!(idx, None);
        assert_eq!(next, b, "no-op must leave the buffer unchanged");
    }

    #[test]
    fn clear_last_clears_rightmost_filled_cell() {
        let b = SlotBuffer::from_word("as");
        let (next, idx) = b.clear_last();
        assert_eq!(idx, Some(1));
        assert_eq!(next.word(), "a");
    }

    #[test]
    fn clear_last_on_empty_buffer_is_noop() {
        let b = SlotBuffer::empty();
        let (next, idx) = b.clear_last();
        assert_eq!(idx, None);
        assert_eq!(next, b);
    }

    #[test]
    fn clear_last_skips_trailing_gap() {
        // A buffer with an embedded gap: clear_last must still take the
        // right-most filled cell, not the right-most cell.
        let b = SlotBuffer::from_word("abc").set_char(4, 'e');
        let (next, idx) = b.clear_last();
        assert_eq!(idx, Some(4));
        assert_eq!(next.word(), "abc");
    }

    #[test]
    fn caret_is_first_empty_and_max_len_when_full() {
        assert_eq!(SlotBuffer::empty().first_empty_index(), 0);
        assert_eq!(SlotBuffer::from_word("as").first_empty_index(), 2);
        assert_eq!(SlotBuffer::from_word("aside").first_empty_index(), MAX_LEN);
    }

    #[test]
    fn word_skips_embedded_gaps() {
        let b = SlotBuffer::empty().set_char(0, 'a').set_char(2, 'c');
        assert_eq!(b.word(), "ac");
    }

    #[test]
    fn mutators_are_copy_on_write() {
        let b = SlotBuffer::from_word("as");
        let (after, _) = b.append_first_empty('i');
        assert_eq!(b.word(), "as", "original buffer must be untouched");
        assert_eq!(after.word(), "asi");
    }
}
