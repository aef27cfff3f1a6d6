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

use crate::host::{ElementRef, Region, ScrollElement, ScrollHost};

/// Content must exceed the box by more than this (px) to count as scrollable.
const OVERFLOW_SLACK_PX: f64 = 1.0;

/// Whether `element` scrolls its own content, by style or by overflow.
pub fn can_scroll(element: &dyn ScrollElement) -> bool {
    element.overflow_y().allows_scrolling()
        || element.scroll_height() - element.client_height() > OVERFLOW_SLACK_PX
}

/// Pick the element that actually scrolls the chat transcript.
///
/// A short or empty thread may not scroll yet; the document scroller (or the
/// root element when none is reported) takes over so page-level scrolling
/// keeps working.
pub fn resolve_chat_target<H: ScrollHost + ?Sized>(host: &H) -> Option<ElementRef> {
    if let Some(thread) = host.query(Region::ChatThread)
        && can_scroll(thread.as_ref())
    {
        return Some(thread);
    }
    host.scrolling_element().or_else(|| host.root_element())
}

/// The log stream has no fallback target.
pub fn resolve_logs_target<H: ScrollHost + ?Sized>(host: &H) -> Option<ElementRef> {
    host.query(Region::LogStream)
}
