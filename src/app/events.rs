// sticky-scroll - Auto-follow scrolling for chat and log transcripts
// Copyright (C) 2025  The sticky-scroll contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use super::feed::FeedEvent;
use super::state::{App, Pane};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: f64 = 3.0;

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        // The header box may have been re-laid out.
        Event::Resize(..) => app.resize.notify(),
        _ => {}
    }
}

/// Must run inside a `LocalSet`.
pub fn handle_feed_event(app: &mut App, event: FeedEvent) {
    match event {
        FeedEvent::Message(message) => app.push_message(message),
        FeedEvent::Log(line) => app.push_log(line),
    }
}

fn is_ctrl_char_shortcut(key: KeyEvent, expected: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&expected))
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if is_ctrl_char_shortcut(key, 'c') {
        app.should_quit = true;
        return;
    }
    let pane = app.focus;
    let page = (app.viewport_rows(pane) - 1.0).max(1.0);
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab | KeyCode::BackTab => app.focus = app.focus.toggle(),
        KeyCode::Char('n') => app.new_session(),
        KeyCode::Char('e') => app.export_logs(),
        KeyCode::Char('t') => app.toggle_tools_expanded(),
        KeyCode::Up => app.scroll_pane_by_rows(pane, -1.0),
        KeyCode::Down => app.scroll_pane_by_rows(pane, 1.0),
        KeyCode::PageUp => app.scroll_pane_by_rows(pane, -page),
        KeyCode::PageDown => app.scroll_pane_by_rows(pane, page),
        KeyCode::Home => app.scroll_pane_to(pane, 0.0),
        KeyCode::End => app.scroll_pane_to(pane, f64::MAX),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let pane = pane_at(app, mouse.column, mouse.row).unwrap_or(app.focus);
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_pane_by_rows(pane, -WHEEL_ROWS),
        MouseEventKind::ScrollDown => app.scroll_pane_by_rows(pane, WHEEL_ROWS),
        MouseEventKind::Down(MouseButton::Left) => app.focus = pane,
        _ => {}
    }
}

fn pane_at(app: &App, column: u16, row: u16) -> Option<Pane> {
    let position = Position::new(column, row);
    if app.chat_area.contains(position) {
        Some(Pane::Chat)
    } else if app.logs_area.contains(position) {
        Some(Pane::Logs)
    } else {
        None
    }
}
