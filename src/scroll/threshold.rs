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

/// Distance from the bottom (px) still treated as "at the bottom" of a chat.
pub const NEAR_BOTTOM_THRESHOLD: f64 = 450.0;

/// Same distance for the log stream view.
pub const LOGS_NEAR_BOTTOM_THRESHOLD: f64 = 80.0;

/// Scroll geometry of one element at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub scroll_height: f64,
    pub scroll_top: f64,
    pub client_height: f64,
}

impl Geometry {
    pub const fn new(scroll_height: f64, scroll_top: f64, client_height: f64) -> Self {
        Self { scroll_height, scroll_top, client_height }
    }

    /// May be negative while layout is settling; callers treat that as "at bottom".
    pub fn distance_from_bottom(&self) -> f64 {
        self.scroll_height - self.scroll_top - self.client_height
    }
}

/// Chat-view classification with the default threshold.
pub fn is_near_bottom(distance_from_bottom: f64) -> bool {
    is_near_bottom_within(distance_from_bottom, NEAR_BOTTOM_THRESHOLD)
}

/// Strict comparison: a distance equal to `threshold` is not near.
pub fn is_near_bottom_within(distance_from_bottom: f64, threshold: f64) -> bool {
    distance_from_bottom < threshold
}
