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

use crate::app::{App, Pane};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let [title_area, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    frame.render_widget(Paragraph::new(title_line(app)), title_area);

    // Log lines are not wrapped, so one entry is one row
    let offset = app.layout_view(Pane::Logs, app.logs.len(), body.height);
    let lines: Vec<Line<'_>> = app
        .logs
        .iter()
        .skip(offset)
        .take(usize::from(body.height))
        .map(|line| Line::raw(line.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines), body);
}

pub fn title_line(app: &App) -> Line<'static> {
    let mut title = Style::default().fg(theme::RUST_ORANGE);
    if app.focus == Pane::Logs {
        title = title.add_modifier(Modifier::BOLD);
    }
    let (state, color) = if app.logs_following() {
        ("following", theme::FOLLOWING)
    } else {
        ("paused, End to follow", theme::PAUSED)
    };
    Line::from(vec![
        Span::styled(format!("Logs ({})", app.logs.len()), title),
        Span::styled(" \u{00B7} ", Style::default().fg(theme::DIM)),
        Span::styled(state, Style::default().fg(color)),
    ])
}
