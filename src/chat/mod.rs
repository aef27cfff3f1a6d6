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

//! Chat transcript content: message normalization and tool output formatting.

pub mod normalizer;
pub mod tool_helpers;

pub use normalizer::{
    MessageContentItem, NormalizedMessage, normalize_message, normalize_role_for_grouping,
};
pub use tool_helpers::{format_tool_output_for_sidebar, is_inline_output, truncated_preview};
