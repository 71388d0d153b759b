use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which view currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Hero,
    Admin,
    Login,
}

/// All logical actions the TUI can perform, independent of key binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Hero screen
    TypeChar(char),
    Backspace,
    Submit,

    // Admin console
    ConsoleChar(char),
    ConsoleBackspace,
    ConsoleSubmit,
    /// Ctrl+c — interrupt the running console task, not quit.
    CancelTask,
    HistoryPrev,
    HistoryNext,

    // Login form
    LoginChar(char),
    LoginBackspace,
    /// Tab/Enter — advance to the next field, or submit from the last one.
    LoginNext,

    // Shared
    ExitMode,
    Quit,
}

/// Map a raw key event to an [`Action`] for the active view.
pub fn map_key(event: KeyEvent, view: ViewKind) -> Option<Action> {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);
    // "plain" = no modifier that would make a char a control sequence
    let plain = !ctrl && !alt;

    // Ctrl+q quits from every view.
    if ctrl && event.code == KeyCode::Char('q') {
        return Some(Action::Quit);
    }

    match view {
        ViewKind::Hero => match event.code {
            // On the hero screen Ctrl+c means quit; in the console it is an
            // interrupt, mapped below.
            KeyCode::Char('c') if ctrl => Some(Action::Quit),
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Char(c) if plain => Some(Action::TypeChar(c)),
            _ => None,
        },
        ViewKind::Admin => match event.code {
            KeyCode::Char('c') if ctrl => Some(Action::CancelTask),
            KeyCode::Esc => Some(Action::ExitMode),
            KeyCode::Enter => Some(Action::ConsoleSubmit),
            KeyCode::Backspace => Some(Action::ConsoleBackspace),
            KeyCode::Up => Some(Action::HistoryPrev),
            KeyCode::Down => Some(Action::HistoryNext),
            KeyCode::Char(c) if plain => Some(Action::ConsoleChar(c)),
            _ => None,
        },
        ViewKind::Login => match event.code {
            KeyCode::Esc => Some(Action::ExitMode),
            KeyCode::Enter | KeyCode::Tab => Some(Action::LoginNext),
            KeyCode::Backspace => Some(Action::LoginBackspace),
            KeyCode::Char(c) if plain => Some(Action::LoginChar(c)),
            _ => None,
        },
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::*;

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: mods,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    fn plain_key(c: char) -> KeyEvent { key(KeyCode::Char(c), KeyModifiers::NONE) }
    fn ctrl_key(c: char)  -> KeyEvent { key(KeyCode::Char(c), KeyModifiers::CONTROL) }

    #[test]
    fn plain_char_types_on_hero() {
        assert_eq!(map_key(plain_key('a'), ViewKind::Hero), Some(Action::TypeChar('a')));
        assert_eq!(map_key(plain_key('7'), ViewKind::Hero), Some(Action::TypeChar('7')));
    }

    #[test]
    fn ctrl_char_does_not_type() {
        assert_eq!(map_key(ctrl_key('x'), ViewKind::Hero), None);
        let alt = key(KeyCode::Char('a'), KeyModifiers::ALT);
        assert_eq!(map_key(alt, ViewKind::Hero), None);
    }

    #[test]
    fn ctrl_q_quits_everywhere() {
        for view in [ViewKind::Hero, ViewKind::Admin, ViewKind::Login] {
            assert_eq!(map_key(ctrl_key('q'), view), Some(Action::Quit));
        }
    }

    #[test]
    fn ctrl_c_quits_on_hero_but_interrupts_in_console() {
        assert_eq!(map_key(ctrl_key('c'), ViewKind::Hero), Some(Action::Quit));
        assert_eq!(map_key(ctrl_key('c'), ViewKind::Admin), Some(Action::CancelTask));
    }

    #[test]
    fn enter_submits_per_view() {
        let enter = key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(map_key(enter, ViewKind::Hero), Some(Action::Submit));
        assert_eq!(map_key(enter, ViewKind::Admin), Some(Action::ConsoleSubmit));
        assert_eq!(map_key(enter, ViewKind::Login), Some(Action::LoginNext));
    }

    #[test]
    fn esc_exits_modes_and_quits_hero() {
        let esc = key(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(map_key(esc, ViewKind::Admin), Some(Action::ExitMode));
        assert_eq!(map_key(esc, ViewKind::Login), Some(Action::ExitMode));
        assert_eq!(map_key(esc, ViewKind::Hero), Some(Action::Quit));
    }

    #[test]
    fn console_history_is_bound_to_arrows() {
        let up = key(KeyCode::Up, KeyModifiers::NONE);
        let down = key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(map_key(up, ViewKind::Admin), Some(Action::HistoryPrev));
        assert_eq!(map_key(down, ViewKind::Admin), Some(Action::HistoryNext));
        assert_eq!(map_key(up, ViewKind::Hero), None);
    }

    #[test]
    fn tab_advances_login_fields() {
        let tab = key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(map_key(tab, ViewKind::Login), Some(Action::LoginNext));
    }
}
