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

//! Stickiness decisions for the chat view.
//!
//! Everything here is synchronous and touches only [`ChatScrollState`]; the
//! scheduler decides *when* these run and the host performs the actual move.

use super::state::ChatScrollState;
use super::threshold::is_near_bottom_within;

/// Outcome of an append request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickDecision {
    /// Follow the new content to the bottom.
    Stick {
        /// The one-time initial-load override is being consumed.
        effective_force: bool,
    },
    /// The user scrolled away; leave the viewport where it is.
    Hold,
}

/// `force` only overrides the user's position before the first auto-scroll
/// of a session. Afterwards a scroll-up always wins.
pub fn effective_force(state: &ChatScrollState, force: bool) -> bool {
    force && !state.has_auto_scrolled
}

/// Classify a user scroll. Scrolling back near the bottom dismisses the
/// "new content below" indicator.
pub fn record_user_scroll(state: &mut ChatScrollState, distance: f64, threshold: f64) {
    state.user_near_bottom = is_near_bottom_within(distance, threshold);
    if state.user_near_bottom {
        state.new_content_below = false;
    }
}

/// Decide an append request. `distance` must be measured at apply time; the
/// cached flag and fresh geometry are both consulted so drift between events
/// cannot strand the view.
pub fn decide(
    state: &ChatScrollState,
    force: bool,
    distance: f64,
    threshold: f64,
) -> StickDecision {
    let effective_force = effective_force(state, force);
    if effective_force || state.user_near_bottom || is_near_bottom_within(distance, threshold) {
        StickDecision::Stick { effective_force }
    } else {
        StickDecision::Hold
    }
}

/// Apply the state side of a decision. The caller moves the element for
/// [`StickDecision::Stick`].
pub fn commit(state: &mut ChatScrollState, decision: StickDecision) {
    match decision {
        StickDecision::Stick { effective_force } => {
            if effective_force {
                state.has_auto_scrolled = true;
            }
            state.user_near_bottom = true;
            state.new_content_below = false;
        }
        StickDecision::Hold => state.new_content_below = true,
    }
}

/// Re-check for the delayed retry. `effective_force` is the value the
/// original request resolved to, not a fresh evaluation.
pub fn should_restick(
    state: &ChatScrollState,
    effective_force: bool,
    distance: f64,
    threshold: f64,
) -> bool {
    effective_force || state.user_near_bottom || is_near_bottom_within(distance, threshold)
}
