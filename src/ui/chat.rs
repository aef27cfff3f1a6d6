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
use crate::chat::{
    MessageContentItem, NormalizedMessage, format_tool_output_for_sidebar, is_inline_output,
    normalize_role_for_grouping, truncated_preview,
};
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

const PAD: &str = "  ";

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let lines = transcript_lines(&app.messages, app.tools_expanded, app.session);

    let heights: Vec<usize> = lines.iter().map(|line| wrapped_rows(line, area.width)).collect();
    let offset = app.layout_view(Pane::Chat, heights.iter().sum(), area.height);

    // Skip whole lines first; Paragraph::scroll only takes a u16 row offset
    let (skip, within) = split_offset(&heights, offset);
    let visible: Vec<Line<'static>> = lines.into_iter().skip(skip).collect();
    let paragraph = Paragraph::new(Text::from(visible)).wrap(Wrap { trim: false });
    frame.render_widget(paragraph.scroll((within, 0)), area);
}

/// Rows one line takes once wrapped to `width`.
fn wrapped_rows(line: &Line<'_>, width: u16) -> usize {
    Paragraph::new(line.clone()).wrap(Wrap { trim: false }).line_count(width)
}

/// Number of whole lines above row `offset`, and the remaining rows to
/// scroll inside the first visible line.
fn split_offset(heights: &[usize], offset: usize) -> (usize, u16) {
    let mut remaining = offset;
    for (index, &height) in heights.iter().enumerate() {
        if remaining < height {
            return (index, u16::try_from(remaining).unwrap_or(u16::MAX));
        }
        remaining -= height;
    }
    (heights.len(), 0)
}

/// All transcript lines, with one role header per run of same-role messages.
pub fn transcript_lines(
    messages: &[NormalizedMessage],
    tools_expanded: bool,
    session: u32,
) -> Vec<Line<'static>> {
    if messages.is_empty() {
        return vec![Line::from(Span::styled(
            format!("{PAD}Waiting for messages in session {session}\u{2026}"),
            Style::default().fg(theme::DIM),
        ))];
    }

    let mut lines = Vec::new();
    let mut previous_group: Option<String> = None;
    for message in messages {
        let group = normalize_role_for_grouping(&message.role);
        if previous_group.as_deref() != Some(group.as_str()) {
            if previous_group.is_some() {
                lines.push(Line::default());
            }
            let (label, color) = theme::role_label(&group);
            lines.push(Line::from(Span::styled(
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            previous_group = Some(group);
        }
        lines.extend(message_lines(message, tools_expanded));
    }
    lines
}

fn message_lines(message: &NormalizedMessage, tools_expanded: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for item in &message.content {
        if let Some(text) = &item.text {
            let body = if message.is_tool_result() {
                tool_output(text, tools_expanded)
            } else {
                text.clone()
            };
            lines.extend(body.lines().map(|line| Line::from(format!("{PAD}{line}"))));
        } else if let Some(call) = tool_call_line(item) {
            lines.push(call);
        }
    }
    lines
}

fn tool_output(text: &str, expanded: bool) -> String {
    if expanded {
        format_tool_output_for_sidebar(text)
    } else if is_inline_output(text) {
        text.to_owned()
    } else {
        truncated_preview(text)
    }
}

fn tool_call_line(item: &MessageContentItem) -> Option<Line<'static>> {
    let name = item.name.as_deref()?;
    let args = item.args.as_ref().map(ToString::to_string).unwrap_or_default();
    Some(Line::from(vec![
        Span::styled(format!("{PAD}{} ", theme::ICON_TOOL), Style::default().fg(theme::DIM)),
        Span::styled(name.to_owned(), Style::default().fg(theme::ROLE_TOOL)),
        Span::styled(format!(" {args}"), Style::default().fg(theme::DIM)),
    ]))
}
