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
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const HEADER_PAD: u16 = 2;

/// Rows the header needs: the status line plus an optional notice.
pub fn row_count(app: &App) -> u16 {
    1 + u16::from(app.notice.is_some())
}

pub fn lines(app: &App) -> Vec<Line<'static>> {
    let sep = || Span::styled("  \u{2502}  ", Style::default().fg(theme::DIM));
    let focus = match app.focus {
        Pane::Chat => "Chat",
        Pane::Logs => "Logs",
    };

    let mut spans = vec![
        Span::styled(
            "sticky-demo",
            Style::default().fg(theme::RUST_ORANGE).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled("Session ", Style::default().fg(theme::DIM)),
        Span::styled(app.session.to_string(), Style::default().fg(Color::White)),
        sep(),
        Span::styled("Focus: ", Style::default().fg(theme::DIM)),
        Span::styled(focus, Style::default().fg(Color::White)),
    ];
    if let Some(height) = app.topbar_height() {
        spans.push(sep());
        spans.push(Span::styled(format!("topbar {height}"), Style::default().fg(theme::DIM)));
    }
    if app.new_content_below() {
        spans.push(sep());
        spans.push(Span::styled(
            format!("{} New messages below", theme::ICON_NEW_BELOW),
            Style::default().fg(theme::NEW_CONTENT).add_modifier(Modifier::BOLD),
        ));
    }

    let mut lines = vec![Line::from(spans)];
    if let Some(notice) = &app.notice {
        lines.push(Line::from(Span::styled(notice.clone(), Style::default().fg(theme::DIM))));
    }
    lines
}

pub fn render(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let padded = Rect {
        x: area.x + HEADER_PAD,
        y: area.y,
        width: area.width.saturating_sub(HEADER_PAD * 2),
        height: area.height,
    };
    frame.render_widget(Paragraph::new(lines), padded);
}
