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

use ratatui::layout::{Constraint, Layout, Rect};

/// Terminals narrower than this stack the panes vertically.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 80;
/// Share of the body given to the log pane.
const LOGS_PERCENT: u16 = 40;

pub struct AppLayout {
    pub header: Rect,
    pub header_sep: Rect,
    pub chat: Rect,
    /// Column or row between the panes.
    pub divider: Rect,
    pub logs: Rect,
    pub footer: Option<Rect>,
    pub side_by_side: bool,
}

pub fn compute(area: Rect, header_rows: u16) -> AppLayout {
    let header_rows = header_rows.max(1);
    let show_footer = area.height >= 8;

    let [header, header_sep, body, footer] = Layout::vertical([
        Constraint::Length(header_rows),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(u16::from(show_footer)),
    ])
    .areas(area);

    let side_by_side = area.width >= SIDE_BY_SIDE_MIN_WIDTH;
    let (chat, divider, logs) = if side_by_side {
        let [chat, divider, logs] = Layout::horizontal([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Percentage(LOGS_PERCENT),
        ])
        .areas(body);
        (chat, divider, logs)
    } else {
        let [chat, divider, logs] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Percentage(LOGS_PERCENT),
        ])
        .areas(body);
        (chat, divider, logs)
    };

    AppLayout {
        header,
        header_sep,
        chat,
        divider,
        logs,
        footer: show_footer.then_some(footer),
        side_by_side,
    }
}
