//! Pointer gesture resolution: tap vs. long-press vs. drag-cancel, plus the
//! horizontal swipe used to delete letters and interrupt the console task.
//!
//! Each active pointer-id owns an explicit session record with defined
//! transitions (Idle → Pressed → LongPressFired | Released | CancelledByDrag)
//! instead of ad-hoc captured timers.  The tracker never arms a real timer:
//! it exposes the earliest pending deadline and the shell polls it, which
//! makes stale-timer races impossible to express — a cancelled session simply
//! has no deadline left to fire.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::trace;

/// Hold duration after which a press becomes a long-press.
pub const LONG_PRESS_WINDOW: Duration = Duration::from_millis(450);

/// Movement on either axis beyond this cancels a pending press.
pub const DRAG_CANCEL_PX: i32 = 10;

/// Minimum leftward travel for a swipe gesture.
pub const SWIPE_PX: i32 = 40;

/// What kind of pointer produced an event.  Pens behave like touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse presses defer entirely to release: no long-press timer, one
    /// short press emitted on pointer-up.
    Mouse,
    /// Touch/pen presses arm the long-press deadline on pointer-down.
    Touch,
}

/// One resolved keypad press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitPress {
    pub digit: char,
    pub long_press: bool,
}

#[derive(Debug)]
struct PointerSession {
    digit: char,
    origin: (i32, i32),
    /// Pending long-press deadline; `None` for mouse pointers and after the
    /// long-press fired.
    deadline: Option<Instant>,
    long_fired: bool,
}

/// Per-pointer-id gesture state machine.
///
/// Invariant: exactly one [`DigitPress`] is emitted per completed gesture —
/// never two, never zero — unless the gesture was cancelled by dragging.
#[derive(Debug)]
pub struct GestureTracker {
    long_press: Duration,
    drag_cancel: i32,
    sessions: HashMap<u64, PointerSession>,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(LONG_PRESS_WINDOW, DRAG_CANCEL_PX)
    }
}

impl GestureTracker {
    pub fn new(long_press: Duration, drag_cancel: i32) -> Self {
        Self {
            long_press,
            drag_cancel,
            sessions: HashMap::new(),
        }
    }

    /// Start a gesture on `digit`.  A second down for an id already being
    /// tracked restarts that id's session.
    pub fn pointer_down(
        &mut self,
        id: u64,
        kind: PointerKind,
        digit: char,
        x: i32,
        y: i32,
        now: Instant,
    ) {
        let deadline = match kind {
            PointerKind::Mouse => None,
            PointerKind::Touch => Some(now + self.long_press),
        };
        trace!(id, digit = %digit, ?kind, "pointer down");
        self.sessions.insert(
            id,
            PointerSession { digit, origin: (x, y), deadline, long_fired: false },
        );
    }

    /// Movement for a tracked pointer.  Exceeding the threshold on either
    /// axis before the long-press fires destroys the session: no event will
    /// be emitted for this gesture.
    pub fn pointer_move(&mut self, id: u64, x: i32, y: i32) {
        let Some(session) = self.sessions.get(&id) else {
            return;
        };
        if session.deadline.is_none() {
            return;
        }
        let dx = (x - session.origin.0).abs();
        let dy = (y - session.origin.1).abs();
        if dx > self.drag_cancel || dy > self.drag_cancel {
            trace!(id, dx, dy, "press cancelled by drag");
            self.sessions.remove(&id);
        }
    }

    /// Finish a gesture.  Returns the short press for a tap, or `None` when
    /// the long-press already fired (the release is consumed so the digit is
    /// not inserted twice) or the session was cancelled.
    pub fn pointer_up(&mut self, id: u64) -> Option<DigitPress> {
        let session = self.sessions.remove(&id)?;
        if session.long_fired {
            return None;
        }
        Some(DigitPress { digit: session.digit, long_press: false })
    }

    /// Fire every long-press whose deadline has elapsed.  The press is
    /// emitted immediately, not deferred to release.
    pub fn poll(&mut self, now: Instant) -> Vec<DigitPress> {
        let mut fired = Vec::new();
        for (id, session) in &mut self.sessions {
            if let Some(deadline) = session.deadline {
                if deadline <= now {
                    session.deadline = None;
                    session.long_fired = true;
                    trace!(id, digit = %session.digit, "long-press fired");
                    fired.push(DigitPress { digit: session.digit, long_press: true });
                }
            }
        }
        fired
    }

    /// Earliest pending long-press deadline, for the shell's timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.sessions.values().filter_map(|s| s.deadline).min()
    }
}

// ─── Swipe ────────────────────────────────────────────────────────────────────

/// A recognised swipe gesture.  Only leftward swipes carry meaning (delete a
/// letter on the hero screen, interrupt the countdown in the console).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Left,
}

/// Tracks one horizontal swipe from touch-start to touch-end.
#[derive(Debug)]
pub struct SwipeTracker {
    threshold: i32,
    start_x: Option<i32>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_PX)
    }
}

impl SwipeTracker {
    pub fn new(threshold: i32) -> Self {
        Self { threshold, start_x: None }
    }

    pub fn begin(&mut self, x: i32) {
        self.start_x = Some(x);
    }

    /// End the gesture and classify it.
    pub fn end(&mut self, x: i32) -> Option<Swipe> {
        let start = self.start_x.take()?;
        if x - start < -self.threshold {
            Some(Swipe::Left)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn t(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn tap_emits_exactly_one_short_press() {
        let mut g = GestureTracker::default();
        let base = Instant::now();
        g.pointer_down(1, PointerKind::Touch, '5', 0, 0, base);
        assert!(g.poll(t(base, 100)).is_empty(), "no long-press before 450ms");
        assert_eq!(
            g.pointer_up(1),
            Some(DigitPress { digit: '5', long_press: false })
        );
        assert_eq!(g.pointer_up(1), None, "the session is consumed");
    }

    #[test]
    fn hold_past_deadline_emits_one_long_press_and_release_emits_nothing() {
        let mut g = GestureTracker::default();
        let base = Instant::now();
        g.pointer_down(1, PointerKind::Touch, '5', 0, 0, base);
        let fired = g.poll(t(base, 450));
        assert_eq!(fired, vec![DigitPress { digit: '5', long_press: true }]);
        assert!(g.poll(t(base, 500)).is_empty(), "long-press fires once");
        assert_eq!(g.pointer_up(1), None, "release after long-press is consumed");
    }

    #[test]
    fn drag_past_threshold_cancels_everything() {
        let mut g = GestureTracker::default();
        let base = Instant::now();
        g.pointer_down(1, PointerKind::Touch, '5', 100, 100, base);
        g.pointer_move(1, 111, 100);
        assert!(g.poll(t(base, 450)).is_empty(), "cancelled press must not fire");
        assert_eq!(g.pointer_up(1), None, "cancelled press emits zero events");
    }

    #[test]
    fn movement_within_threshold_does_not_cancel() {
        let mut g = GestureTracker::default();
        let base = Instant::now();
        g.pointer_down(1, PointerKind::Touch, '5', 100, 100, base);
        g.pointer_move(1, 110, 92);
        assert_eq!(
            g.pointer_up(1),
            Some(DigitPress { digit: '5', long_press: false })
        );
    }

    #[test]
    fn mouse_press_defers_to_release() {
        let mut g = GestureTracker::default();
        let base = Instant::now();
        g.pointer_down(0, PointerKind::Mouse, '2', 0, 0, base);
        assert_eq!(g.next_deadline(), None, "mouse never arms a timer");
        assert!(g.poll(t(base, 1000)).is_empty());
        assert_eq!(
            g.pointer_up(0),
            Some(DigitPress { digit: '2', long_press: false })
        );
    }

    #[test]
    fn concurrent_pointers_are_isolated() {
        // One finger drags away while another holds: the drag-cancel must
        // not disturb the other pointer's pending long-press.
        let mut g = GestureTracker::default();
        let base = Instant::now();
        g.pointer_down(1, PointerKind::Touch, '2', 0, 0, base);
        g.pointer_down(2, PointerKind::Touch, '8', 50, 50, base);
        g.pointer_move(1, 30, 0);
        let fired = g.poll(t(base, 450));
        assert_eq!(fired, vec![DigitPress { digit: '8', long_press: true }]);
    }

    #[test]
    fn next_deadline_is_earliest_pending() {
        let mut g = GestureTracker::default();
        let base = Instant::now();
        g.pointer_down(1, PointerKind::Touch, '2', 0, 0, base);
        g.pointer_down(2, PointerKind::Touch, '3', 0, 0, t(base, 100));
        assert_eq!(g.next_deadline(), Some(base + LONG_PRESS_WINDOW));
        g.pointer_move(1, 100, 0);
        assert_eq!(
            g.next_deadline(),
            Some(t(base, 100) + LONG_PRESS_WINDOW),
            "cancelling one pointer reveals the other's deadline"
        );
    }

    #[test]
    fn swipe_left_past_threshold_is_recognised() {
        let mut s = SwipeTracker::default();
        s.begin(200);
        assert_eq!(s.end(150), Some(Swipe::Left));
    }

    #[test]
    fn short_or_rightward_travel_is_not_a_swipe() {
        let mut s = SwipeTracker::default();
        s.begin(200);
        assert_eq!(s.end(160), None, "40px exactly is below the threshold");
        s.begin(200);
        assert_eq!(s.end(260), None);
    }

    #[test]
    fn swipe_end_without_begin_is_noop() {
        let mut s = SwipeTracker::default();
        assert_eq!(s.end(0), None);
        s.begin(100);
        s.cancel();
        assert_eq!(s.end(0), None);
    }
}
