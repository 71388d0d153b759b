// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use chrono::Datelike;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use aside_console::Console;
use aside_core::{SlotBuffer, DELETE_KEY, MAX_LEN};

use crate::layout::{KEY_HEIGHT, KEY_WIDTH};

// ── Character sets ────────────────────────────────────────────────────────────

fn caret_char(ascii: bool) -> &'static str {
    if ascii { "|" } else { "▏" }
}
fn delete_label(ascii: bool) -> &'static str {
    if ascii { "del" } else { "⌫" }
}
fn border_type(ascii: bool) -> BorderType {
    if ascii { BorderType::Plain } else { BorderType::Rounded }
}

/// Keypad rows in phone order.  The bottom row carries delete and the
/// literal zero; its third cell is empty.
const KEYPAD_ROWS: [[Option<char>; 3]; 4] = [
    [Some('1'), Some('2'), Some('3')],
    [Some('4'), Some('5'), Some('6')],
    [Some('7'), Some('8'), Some('9')],
    [Some(DELETE_KEY), Some('0'), None],
];

/// One keypad key and the screen region it occupies, for pointer hit tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadHit {
    pub key: char,
    pub area: Rect,
}

/// Compute the key regions for a keypad drawn into `area`.
pub fn keypad_hits(area: Rect) -> Vec<KeypadHit> {
    let mut hits = Vec::new();
    for (row, keys) in KEYPAD_ROWS.iter().enumerate() {
        for (col, key) in keys.iter().enumerate() {
            let Some(key) = key else { continue };
            let rect = Rect::new(
                area.x + col as u16 * KEY_WIDTH,
                area.y + row as u16 * KEY_HEIGHT,
                KEY_WIDTH,
                KEY_HEIGHT,
            );
            if rect.right() <= area.right() && rect.bottom() <= area.bottom() {
                hits.push(KeypadHit { key: *key, area: rect });
            }
        }
    }
    hits
}

/// Find the key under a pointer position.
pub fn hit_test(hits: &[KeypadHit], column: u16, row: u16) -> Option<char> {
    hits.iter()
        .find(|h| {
            column >= h.area.x
                && column < h.area.right()
                && row >= h.area.y
                && row < h.area.bottom()
        })
        .map(|h| h.key)
}

// ── Draw functions ────────────────────────────────────────────────────────────

/// Draw the five letter slots with the caret.
pub fn draw_hero(frame: &mut Frame, area: Rect, buffer: &SlotBuffer, caret: usize, ascii: bool) {
    const SLOT_WIDTH: u16 = 5;
    let total = SLOT_WIDTH * MAX_LEN as u16;
    let x0 = area.x + area.width.saturating_sub(total) / 2;
    let y0 = area.y + area.height.saturating_sub(3) / 2;

    for i in 0..MAX_LEN {
        let rect = Rect::new(x0 + i as u16 * SLOT_WIDTH, y0, SLOT_WIDTH, 3);
        if rect.right() > area.right() || rect.bottom() > area.bottom() {
            continue;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type(ascii))
            .border_style(Style::default().fg(if i == caret {
                Color::White
            } else {
                Color::DarkGray
            }));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let glyph = match buffer.cell(i) {
            // The leading letter carries the brand accent.
            Some(ch) if i == 0 => Span::styled(
                ch.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Some(ch) => Span::styled(ch.to_string(), Style::default().fg(Color::White)),
            None if i == caret => Span::styled(
                caret_char(ascii),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
            ),
            None => Span::raw(" "),
        };
        let pad = (inner.width as usize).saturating_sub(glyph.content.width()) / 2;
        let line = Line::from(vec![Span::raw(" ".repeat(pad)), glyph]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

/// Draw the keypad and return the key regions for hit testing.
pub fn draw_keypad(frame: &mut Frame, area: Rect, ascii: bool) -> Vec<KeypadHit> {
    let hits = keypad_hits(area);
    for hit in &hits {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type(ascii))
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(hit.area);
        frame.render_widget(block, hit.area);

        let label = key_label(hit.key, ascii);
        let pad = (inner.width as usize).saturating_sub(label.width()) / 2;
        let line = Line::from(vec![
            Span::raw(" ".repeat(pad)),
            Span::styled(label, Style::default().fg(Color::White)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
    hits
}

/// Key cap text: the digit plus its letters, e.g. `"2 abc"`.
fn key_label(key: char, ascii: bool) -> String {
    if key == DELETE_KEY {
        return delete_label(ascii).to_string();
    }
    match aside_core::letters_for(key) {
        Some(letters) => format!("{key} {letters}"),
        None => key.to_string(),
    }
}

/// Draw the admin console: the log, the transient status line and the prompt.
pub fn draw_console(frame: &mut Frame, area: Rect, console: &Console, ascii: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type(ascii))
        .border_style(Style::default().fg(Color::Green))
        .title(" admin ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for entry in console.log() {
        lines.push(Line::from(Span::styled(
            entry.clone(),
            Style::default().fg(Color::Green),
        )));
    }
    if let Some(transient) = console.transient() {
        lines.push(Line::from(Span::styled(
            transient.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled("admin: ", Style::default().fg(Color::DarkGray)),
        Span::styled(console.input().to_string(), Style::default().fg(Color::White)),
        Span::styled(caret_char(ascii), Style::default().fg(Color::Green)),
    ]));

    // Keep the prompt in view: drop lines from the top once the log is
    // taller than the pane.
    let skip = lines.len().saturating_sub(inner.height as usize);
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();
    frame.render_widget(Paragraph::new(visible), inner);
}

/// Draw the mock login form.
pub fn draw_login(
    frame: &mut Frame,
    area: Rect,
    username: &str,
    password_len: usize,
    on_password: bool,
    error: Option<&str>,
    ascii: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type(ascii))
        .border_style(Style::default().fg(Color::Cyan))
        .title(" login ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let field_style = |active: bool| {
        if active {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("username: ", field_style(!on_password)),
            Span::raw(username.to_string()),
            if on_password { Span::raw("") } else { Span::raw(caret_char(ascii)) },
        ]),
        Line::from(vec![
            Span::styled("password: ", field_style(on_password)),
            Span::raw("*".repeat(password_len)),
            if on_password { Span::raw(caret_char(ascii)) } else { Span::raw("") },
        ]),
    ];
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Enter/Tab: next   Esc: back",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Draw the one-row footer: copyright plus the signed-in user, when any.
pub fn draw_footer(frame: &mut Frame, area: Rect, username: Option<&str>) {
    let year = chrono::Local::now().year();
    let mut spans = vec![Span::styled(
        format!(" © {year} aside.network"),
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(name) = username {
        spans.push(Span::styled(
            format!("  signed in as {name}"),
            Style::default().fg(Color::Green),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ─── Unit tests ───────────────────────────────────────────────────────────────
