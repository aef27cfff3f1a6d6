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

use super::ScrollController;
use super::decision::{self, StickDecision};
use super::policy::ScrollPolicy;
use super::state::{ChatScrollState, LogsScrollState, ScheduledTask};
use super::target::{resolve_chat_target, resolve_logs_target};
use super::threshold::is_near_bottom_within;
use crate::host::{Platform, ScrollBehavior, ScrollHost};
use std::cell::RefCell;
use std::rc::Rc;

/// One append-scroll intent for the chat view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollRequest {
    /// Follow the content even if the user scrolled away, but only for the
    /// first auto-scroll of a session.
    pub force: bool,
    /// Animate the move unless the platform asks for reduced motion.
    pub smooth: bool,
}

impl ScrollRequest {
    pub const fn new(force: bool, smooth: bool) -> Self {
        Self { force, smooth }
    }

    fn behavior(self, platform: &Platform) -> ScrollBehavior {
        if self.smooth && platform.motion_allowed() {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        }
    }
}

impl<H: ScrollHost + 'static> ScrollController<H> {
    /// Follow newly appended chat content once it is rendered.
    ///
    /// A request made while an earlier one is still waiting replaces that
    /// one's parameters instead of restarting the wait, so a stream of
    /// appends still scrolls once per frame, using the newest request.
    pub fn schedule_chat_scroll(&self, force: bool, smooth: bool) {
        self.schedule_chat(ScrollRequest::new(force, smooth));
    }

    pub fn schedule_chat(&self, request: ScrollRequest) {
        if self.chat.borrow_mut().queue_request(request) {
            tracing::trace!(?request, "coalesced into pending chat frame");
            return;
        }

        let host = Rc::clone(&self.host);
        let frames = Rc::clone(&self.frames);
        let state = Rc::clone(&self.chat);
        let platform = self.platform.clone();
        let policy = self.policy;

        let task = tokio::task::spawn_local(async move {
            host.update_complete().await;
            frames.next_frame().await;
            let Some(request) = state.borrow_mut().take_request() else {
                return;
            };

            let Some(effective_force) =
                apply_chat_frame(host.as_ref(), &state, &platform, policy, request)
            else {
                return;
            };

            let delay = policy.retry_delay_for(effective_force);
            let retry_state = Rc::clone(&state);
            let retry = tokio::task::spawn_local(async move {
                tokio::time::sleep(delay).await;
                retry_state.borrow_mut().pending_retry = None;
                apply_chat_retry(host.as_ref(), &retry_state, policy, effective_force);
            });
            state.borrow_mut().set_retry(ScheduledTask::new(retry));
        });
        self.chat.borrow_mut().pending_frame = Some(ScheduledTask::new(task));
    }

    /// Keep the log stream pinned to its tail when it already sits there.
    pub fn schedule_logs_scroll(&self, force: bool) {
        if self.logs.borrow_mut().queue_request(force) {
            tracing::trace!(force, "coalesced into pending logs frame");
            return;
        }

        let host = Rc::clone(&self.host);
        let frames = Rc::clone(&self.frames);
        let state = Rc::clone(&self.logs);
        let threshold = self.policy.logs_near_bottom_px;

        let task = tokio::task::spawn_local(async move {
            host.update_complete().await;
            frames.next_frame().await;
            let Some(force) = state.borrow_mut().take_request() else {
                return;
            };
            apply_logs_frame(host.as_ref(), &state, force, threshold);
        });
        self.logs.borrow_mut().pending_frame = Some(ScheduledTask::new(task));
    }
}

/// Frame step of a chat request. Returns the effective force when a scroll
/// was applied, `None` when the request held or had no target.
fn apply_chat_frame<H: ScrollHost + ?Sized>(
    host: &H,
    state: &RefCell<ChatScrollState>,
    platform: &Platform,
    policy: ScrollPolicy,
    request: ScrollRequest,
) -> Option<bool> {
    let Some(target) = resolve_chat_target(host) else {
        tracing::trace!("chat scroll skipped: no scroll target");
        return None;
    };
    let distance = target.geometry().distance_from_bottom();
    let verdict =
        decision::decide(&state.borrow(), request.force, distance, policy.chat_near_bottom_px);
    decision::commit(&mut state.borrow_mut(), verdict);

    match verdict {
        StickDecision::Hold => {
            tracing::debug!(distance, "chat scroll held: user is reading above");
            None
        }
        StickDecision::Stick { effective_force } => {
            let behavior = request.behavior(platform);
            target.scroll_to(target.scroll_height(), behavior);
            tracing::debug!(distance, effective_force, ?behavior, "chat scroll stuck to bottom");
            Some(effective_force)
        }
    }
}

/// Late correction for content that grew after the first frame.
fn apply_chat_retry<H: ScrollHost + ?Sized>(
    host: &H,
    state: &RefCell<ChatScrollState>,
    policy: ScrollPolicy,
    effective_force: bool,
) {
    let Some(target) = resolve_chat_target(host) else {
        return;
    };
    let distance = target.geometry().distance_from_bottom();
    let threshold = policy.chat_near_bottom_px;
    if !decision::should_restick(&state.borrow(), effective_force, distance, threshold) {
        tracing::trace!(distance, "chat retry skipped: user left the bottom");
        return;
    }
    target.set_scroll_top(target.scroll_height());
    state.borrow_mut().user_near_bottom = true;
    tracing::trace!(distance, "chat retry re-stuck to bottom");
}

fn apply_logs_frame<H: ScrollHost + ?Sized>(
    host: &H,
    state: &RefCell<LogsScrollState>,
    force: bool,
    threshold: f64,
) {
    let Some(target) = resolve_logs_target(host) else {
        return;
    };
    let distance = target.geometry().distance_from_bottom();
    if !(force || is_near_bottom_within(distance, threshold)) {
        return;
    }
    target.set_scroll_top(target.scroll_height());
    tracing::trace!(distance, force, "logs scroll stuck to bottom");
}
