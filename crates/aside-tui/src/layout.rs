use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Keypad grid geometry: 4 rows of keys, each 3 terminal rows tall.
pub const KEY_WIDTH: u16 = 9;
pub const KEY_HEIGHT: u16 = 3;
pub const KEYPAD_HEIGHT: u16 = KEY_HEIGHT * 4;
pub const KEYPAD_WIDTH: u16 = KEY_WIDTH * 3;

/// The regions that make up the TUI layout.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub body: Rect,
    pub keypad: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Calculate layout regions from a `Rect` (terminal area).
    pub fn compute(area: Rect, keypad_visible: bool) -> Self {
        let keypad_height = if keypad_visible { KEYPAD_HEIGHT } else { 0 };

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(keypad_height),
                Constraint::Length(1),
            ])
            .split(area);

        AppLayout {
            body: vertical[0],
            keypad: centered(vertical[1], KEYPAD_WIDTH),
            footer: vertical[2],
        }
    }

    /// Convenience wrapper — derive the area from the current frame.
    pub fn new(frame: &Frame, keypad_visible: bool) -> Self {
        Self::compute(frame.area(), keypad_visible)
    }
}

/// Horizontally centre a fixed-width strip inside `area`.
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
