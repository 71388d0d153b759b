use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use crossterm::event::{Event, EventStream, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tracing::{debug, warn};

use aside_config::Config;
use aside_console::Console;
use aside_core::{
    ActivationDebounce, DigitPress, GestureTracker, ModeRegistry, PointerKind, SlotEditor, Swipe,
    SwipeTracker,
};
use aside_session::{SessionRecord, SessionStore};

use crate::{
    keys::{map_key, Action, ViewKind},
    layout::AppLayout,
    widgets::{draw_console, draw_footer, draw_hero, draw_keypad, draw_login, hit_test, KeypadHit},
};

// ── Login form ────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct LoginForm {
    username: String,
    password: String,
    on_password: bool,
    error: Option<String>,
}

impl LoginForm {
    fn active_field(&mut self) -> &mut String {
        if self.on_password {
            &mut self.password
        } else {
            &mut self.username
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// The top-level TUI application state.
pub struct App {
    config: Arc<Config>,
    view: ViewKind,
    editor: SlotEditor,
    registry: ModeRegistry,
    debounce: ActivationDebounce,
    gestures: GestureTracker,
    swipe: SwipeTracker,
    /// Key regions from the last draw, for pointer hit tests.
    keypad_hits: Vec<KeypadHit>,
    /// Keeps the keypad on screen briefly after the buffer fills, so the
    /// last multi-tap cycle can still be finished.
    sticky_until: Option<Instant>,
    console: Console,
    login: LoginForm,
    store: SessionStore,
    session: Option<SessionRecord>,
}

impl App {
    pub fn new(config: Arc<Config>) -> Self {
        let timing = &config.timing;
        let editor = SlotEditor::new(&config.word, timing.t9_cycle());
        let gestures = GestureTracker::new(timing.long_press(), timing.drag_cancel_px as i32);
        let swipe = SwipeTracker::new(timing.swipe_px as i32);
        let debounce = ActivationDebounce::new(timing.auto_activate());

        let mut registry = ModeRegistry::new();
        registry.register("admin", "admin");
        registry.register("login", "login");

        let store = match &config.session.file {
            Some(path) => SessionStore::new(PathBuf::from(path)),
            None => SessionStore::new(SessionStore::default_path()),
        };
        let session = store.load();
        let console = Console::new().with_tick_interval(timing.countdown_tick());

        Self {
            config,
            view: ViewKind::Hero,
            editor,
            registry,
            debounce,
            gestures,
            swipe,
            keypad_hits: Vec::new(),
            sticky_until: None,
            console,
            login: LoginForm::default(),
            store,
            session,
        }
    }

    /// Run the TUI event loop.
    ///
    /// One timer serves every pending deadline: the loop sleeps until the
    /// earliest of them and polls the owning component when it wakes.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> anyhow::Result<()> {
        let mut events = EventStream::new();

        loop {
            let now = Instant::now();
            self.expire_sticky(now);
            self.draw(&mut terminal, now)?;

            let deadline = self.next_deadline();
            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_term_event(event, Instant::now()) {
                                break;
                            }
                        }
                        Some(Err(err)) => return Err(err.into()),
                        None => break,
                    }
                }
                _ = wait_until(deadline) => {
                    self.on_deadline(Instant::now());
                }
            }
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal, now: Instant) -> anyhow::Result<()> {
        let ascii = self.config.tui.ascii_borders;
        let keypad_visible = self.keypad_visible(now);

        terminal.draw(|frame| {
            let layout = AppLayout::new(frame, keypad_visible);
            match self.view {
                ViewKind::Hero => {
                    draw_hero(frame, layout.body, self.editor.buffer(), self.editor.caret(), ascii);
                    self.keypad_hits = if keypad_visible {
                        draw_keypad(frame, layout.keypad, ascii)
                    } else {
                        Vec::new()
                    };
                }
                ViewKind::Admin => {
                    draw_console(frame, layout.body, &self.console, ascii);
                    self.keypad_hits.clear();
                }
                ViewKind::Login => {
                    draw_login(
                        frame,
                        layout.body,
                        &self.login.username,
                        self.login.password.chars().count(),
                        self.login.on_password,
                        self.login.error.as_deref(),
                        ascii,
                    );
                    self.keypad_hits.clear();
                }
            }
            draw_footer(
                frame,
                layout.footer,
                self.session.as_ref().map(|s| s.user.username.as_str()),
            );
        })?;
        Ok(())
    }

    fn keypad_visible(&self, now: Instant) -> bool {
        if self.view != ViewKind::Hero {
            return false;
        }
        !self.editor.is_full() || self.sticky_until.is_some_and(|until| now < until)
    }

    fn expire_sticky(&mut self, now: Instant) {
        if self.sticky_until.is_some_and(|until| until <= now) {
            self.sticky_until = None;
        }
    }

    // ── Deadlines ─────────────────────────────────────────────────────────────

    /// Earliest pending deadline across every timed component.
    fn next_deadline(&self) -> Option<Instant> {
        let mut deadlines = vec![self.gestures.next_deadline()];
        match self.view {
            ViewKind::Hero => {
                deadlines.push(self.debounce.next_deadline());
                deadlines.push(self.sticky_until);
            }
            ViewKind::Admin => deadlines.push(self.console.next_deadline()),
            ViewKind::Login => {}
        }
        deadlines.into_iter().flatten().min()
    }

    fn on_deadline(&mut self, now: Instant) {
        for press in self.gestures.poll(now) {
            self.apply_press(press, now);
        }
        if let Some(name) = self.debounce.poll(now) {
            if self.view == ViewKind::Hero {
                self.activate(&name);
            }
        }
        if self.view == ViewKind::Admin {
            self.console.tick(now);
        }
        self.expire_sticky(now);
    }

    // ── Terminal events ───────────────────────────────────────────────────────

    /// Returns `true` when the application should exit.
    fn handle_term_event(&mut self, event: Event, now: Instant) -> bool {
        match event {
            Event::Key(k) if k.kind == KeyEventKind::Press => {
                if let Some(action) = map_key(k, self.view) {
                    return self.dispatch(action, now);
                }
                false
            }
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse, now);
                false
            }
            _ => false,
        }
    }

    fn dispatch(&mut self, action: Action, now: Instant) -> bool {
        match action {
            // ── Hero ──────────────────────────────────────────────────────────
            Action::TypeChar(c) => {
                self.editor.type_char(c);
            }
            Action::Backspace => {
                self.editor.backspace();
            }
            Action::Submit => {
                if let Some(name) = self
                    .registry
                    .lookup_by_word(&self.editor.word())
                    .map(|m| m.name.clone())
                {
                    self.activate(&name);
                }
            }

            // ── Admin console ─────────────────────────────────────────────────
            Action::ConsoleChar(c) => self.console.push_char(c),
            Action::ConsoleBackspace => self.console.backspace_char(),
            Action::ConsoleSubmit => {
                self.console.submit(now);
                if self.console.take_close_request() {
                    self.exit_mode();
                }
            }
            Action::CancelTask => self.console.cancel(),
            Action::HistoryPrev => self.console.history_prev(),
            Action::HistoryNext => self.console.history_next(),

            // ── Login ─────────────────────────────────────────────────────────
            Action::LoginChar(c) => self.login.active_field().push(c),
            Action::LoginBackspace => {
                self.login.active_field().pop();
            }
            Action::LoginNext => {
                if self.login.on_password {
                    self.submit_login();
                } else {
                    self.login.on_password = true;
                }
            }

            // ── Shared ────────────────────────────────────────────────────────
            Action::ExitMode => self.exit_mode(),
            Action::Quit => return true,
        }
        false
    }

    // ── Pointer events ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let x = mouse.column as i32;
        let y = mouse.row as i32;
        match mouse.kind {
            MouseEventKind::Down(button) => {
                let key = (self.view == ViewKind::Hero)
                    .then(|| hit_test(&self.keypad_hits, mouse.column, mouse.row))
                    .flatten();
                match key {
                    Some(key) => {
                        // The left button behaves like a mouse press (resolved
                        // on release); the right button behaves like touch and
                        // can long-press into a literal digit.
                        let kind = match button {
                            MouseButton::Left => PointerKind::Mouse,
                            _ => PointerKind::Touch,
                        };
                        self.gestures.pointer_down(pointer_id(button), kind, key, x, y, now);
                    }
                    // A press that lands on a key is a key gesture, never the
                    // start of a swipe.
                    None => self.swipe.begin(x),
                }
            }
            MouseEventKind::Drag(button) => {
                self.gestures.pointer_move(pointer_id(button), x, y);
            }
            MouseEventKind::Up(button) => {
                if let Some(press) = self.gestures.pointer_up(pointer_id(button)) {
                    self.apply_press(press, now);
                }
                if self.swipe.end(x) == Some(Swipe::Left) {
                    match self.view {
                        ViewKind::Hero => {
                            self.editor.backspace();
                        }
                        ViewKind::Admin => self.console.cancel(),
                        ViewKind::Login => {}
                    }
                }
            }
            _ => {}
        }
    }

    /// Apply one resolved keypad press to the editor and refresh the
    /// dependent state (activation debounce, sticky keypad window).
    fn apply_press(&mut self, press: DigitPress, now: Instant) {
        if self.view != ViewKind::Hero {
            return;
        }
        if self.editor.press_digit(press.digit, press.long_press, now).is_some() {
            let word = self.editor.word();
            self.debounce.note_word(self.registry.lookup_by_word(&word), now);
        }
        self.sticky_until = if self.editor.is_full() {
            Some(now + self.config.timing.keypad_sticky())
        } else {
            None
        };
    }

    // ── Modes ─────────────────────────────────────────────────────────────────

    fn activate(&mut self, name: &str) {
        debug!(mode = name, "activating mode");
        self.debounce.cancel();
        self.swipe.cancel();
        match name {
            "admin" => {
                self.console = self.fresh_console();
                self.view = ViewKind::Admin;
            }
            "login" => {
                self.login = LoginForm::default();
                self.view = ViewKind::Login;
            }
            other => debug!(mode = other, "no view for mode"),
        }
    }

    /// Return to the hero screen.  The buffer goes back to the initial word
    /// and every pending deadline tied to the old view dies with it.
    fn exit_mode(&mut self) {
        self.view = ViewKind::Hero;
        self.editor.reset();
        self.sticky_until = None;
        self.debounce.cancel();
        self.console = self.fresh_console();
    }

    fn fresh_console(&self) -> Console {
        Console::new().with_tick_interval(self.config.timing.countdown_tick())
    }

    fn submit_login(&mut self) {
        let username = self.login.username.trim().to_string();
        if username.is_empty() {
            self.login.error = Some("username is required".to_string());
            self.login.on_password = false;
            return;
        }
        let record = SessionRecord::mock(&username, Utc::now(), self.config.session.ttl_secs as i64);
        match self.store.save(&record) {
            Ok(()) => {
                self.session = Some(record);
                self.exit_mode();
            }
            Err(err) => {
                warn!(%err, "failed to persist session");
                self.login.error = Some(format!("could not save session: {err}"));
            }
        }
    }
}

/// Stable per-button pointer id.
fn pointer_id(button: MouseButton) -> u64 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await
        }
        None => std::future::pending().await,
    }
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
