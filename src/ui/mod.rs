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

mod chat;
mod header;
mod layout;
mod logs;
pub mod theme;

pub use chat::transcript_lines;

use crate::app::App;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

const FOOTER_PAD: u16 = 2;
const FOOTER_HINT: &str = concat!(
    "Tab focus  \u{2191}\u{2193} PgUp PgDn Home End scroll  ",
    "t tools  n new session  e export  q quit"
);

pub fn render(frame: &mut Frame, app: &mut App) {
    let frame_area = frame.area();

    // Header height is reported before layout so the topbar observer sees it
    let header_rows = header::row_count(app);
    app.set_header_rows(header_rows);
    let areas = layout::compute(frame_area, header_rows);

    header::render(frame, areas.header, header::lines(app));
    render_separator(frame, areas.header_sep);

    app.chat_area = areas.chat;
    app.logs_area = areas.logs;
    chat::render(frame, areas.chat, app);
    render_divider(frame, areas.divider, areas.side_by_side);
    logs::render(frame, areas.logs, app);

    if let Some(footer_area) = areas.footer {
        render_footer(frame, footer_area);
    }
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let line = theme::SEPARATOR_CHAR.repeat(usize::from(area.width));
    frame.render_widget(Paragraph::new(Span::styled(line, Style::default().fg(theme::DIM))), area);
}

fn render_divider(frame: &mut Frame, area: Rect, vertical: bool) {
    if !vertical {
        render_separator(frame, area);
        return;
    }
    let lines: Vec<Line<'static>> = (0..area.height)
        .map(|_| Line::from(Span::styled(theme::DIVIDER_CHAR, Style::default().fg(theme::DIM))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let padded = Rect {
        x: area.x + FOOTER_PAD,
        y: area.y,
        width: area.width.saturating_sub(FOOTER_PAD * 2),
        height: area.height,
    };
    // Drop the hint entirely rather than cut a key binding in half
    if FOOTER_HINT.width() > usize::from(padded.width) {
        return;
    }
    frame.render_widget(
        Paragraph::new(Span::styled(FOOTER_HINT, Style::default().fg(theme::DIM))),
        padded,
    );
}
