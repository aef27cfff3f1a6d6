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

use super::threshold::{LOGS_NEAR_BOTTOM_THRESHOLD, NEAR_BOTTOM_THRESHOLD};
use std::time::Duration;

pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(120);
pub const DEFAULT_FORCED_RETRY_DELAY: Duration = Duration::from_millis(150);

/// Tuned thresholds and delays for the scroll scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPolicy {
    pub chat_near_bottom_px: f64,
    pub logs_near_bottom_px: f64,
    /// Delay of the re-stick check after a regular stick.
    pub retry_delay: Duration,
    /// Delay of the re-stick check after the one-time forced stick.
    pub forced_retry_delay: Duration,
}

impl ScrollPolicy {
    pub const fn retry_delay_for(&self, effective_force: bool) -> Duration {
        if effective_force { self.forced_retry_delay } else { self.retry_delay }
    }
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self {
            chat_near_bottom_px: NEAR_BOTTOM_THRESHOLD,
            logs_near_bottom_px: LOGS_NEAR_BOTTOM_THRESHOLD,
            retry_delay: DEFAULT_RETRY_DELAY,
            forced_retry_delay: DEFAULT_FORCED_RETRY_DELAY,
        }
    }
}
