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

//! Formatting for tool output shown in tool cards and the sidebar.

/// Outputs up to this many characters render inline instead of collapsed.
pub const TOOL_INLINE_THRESHOLD: usize = 80;
/// Lines kept in a collapsed preview.
pub const PREVIEW_MAX_LINES: usize = 2;
/// Characters kept in a collapsed preview.
pub const PREVIEW_MAX_CHARS: usize = 100;

const ELLIPSIS: char = '…';

/// Pretty-print JSON output inside a fenced `json` block. Anything that is
/// not a JSON object or array comes back unchanged.
pub fn format_tool_output_for_sidebar(text: &str) -> String {
    let trimmed = text.trim();
    if (trimmed.starts_with('{') || trimmed.starts_with('['))
        && let Ok(pretty) = serde_json::from_str::<serde_json::Value>(trimmed)
            .and_then(|parsed| serde_json::to_string_pretty(&parsed))
    {
        return format!("```json\n{pretty}\n```");
    }
    text.to_owned()
}

/// First [`PREVIEW_MAX_LINES`] lines, cut to [`PREVIEW_MAX_CHARS`], with an
/// ellipsis whenever anything was dropped.
pub fn truncated_preview(text: &str) -> String {
    let total_lines = text.split('\n').count();
    let lines: Vec<&str> = text.split('\n').take(PREVIEW_MAX_LINES).collect();
    let preview = lines.join("\n");

    if preview.chars().count() > PREVIEW_MAX_CHARS {
        let mut cut: String = preview.chars().take(PREVIEW_MAX_CHARS).collect();
        cut.push(ELLIPSIS);
        return cut;
    }
    if lines.len() < total_lines {
        return format!("{preview}{ELLIPSIS}");
    }
    preview
}

pub fn is_inline_output(text: &str) -> bool {
    text.chars().count() <= TOOL_INLINE_THRESHOLD
}
