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

use ratatui::style::Color;

// Accent
pub const RUST_ORANGE: Color = Color::Rgb(244, 118, 0);

// UI chrome
pub const DIM: Color = Color::DarkGray;
pub const SEPARATOR_CHAR: &str = "─";
pub const DIVIDER_CHAR: &str = "│";

// Role header colors
pub const ROLE_USER: Color = Color::White;
pub const ROLE_ASSISTANT: Color = RUST_ORANGE;
pub const ROLE_TOOL: Color = Color::Cyan;
pub const ROLE_SYSTEM: Color = Color::Yellow;

// Indicators
pub const NEW_CONTENT: Color = Color::Yellow;
pub const FOLLOWING: Color = Color::Green;
pub const PAUSED: Color = Color::Yellow;
pub const ICON_NEW_BELOW: &str = "↓";
pub const ICON_TOOL: &str = "⟩";

/// Header label and color for a grouped role (see `normalize_role_for_grouping`).
pub fn role_label(grouped_role: &str) -> (String, Color) {
    match grouped_role {
        "user" | "User" => ("You".to_owned(), ROLE_USER),
        "assistant" => ("Assistant".to_owned(), ROLE_ASSISTANT),
        "tool" => ("Tool".to_owned(), ROLE_TOOL),
        "system" => ("System".to_owned(), ROLE_SYSTEM),
        other => (other.to_owned(), DIM),
    }
}
