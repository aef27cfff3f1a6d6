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

use super::scheduler::ScrollRequest;
use tokio::task::JoinHandle;

/// Deferred scroll work that can be dropped before it runs.
///
/// Cancelling is best-effort: a task that already finished is unaffected and
/// an aborted task never resumes. Dropping the handle does NOT cancel.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    pub(crate) fn new(handle: JoinHandle<()>) -> Self {
        Self { handle }
    }

    pub fn cancel(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Stickiness state of one chat transcript view.
#[derive(Debug)]
pub struct ChatScrollState {
    /// The one-time forced scroll of this session already happened.
    pub has_auto_scrolled: bool,
    /// Last known "within threshold" classification.
    pub user_near_bottom: bool,
    /// Content arrived while the user was scrolled away.
    pub new_content_below: bool,
    pub(crate) pending_frame: Option<ScheduledTask>,
    pub(crate) pending_retry: Option<ScheduledTask>,
    /// Newest intent, picked up by the pending frame task when it fires.
    pub(crate) queued: Option<ScrollRequest>,
}

impl ChatScrollState {
    pub fn new() -> Self {
        Self {
            has_auto_scrolled: false,
            user_near_bottom: true,
            new_content_below: false,
            pending_frame: None,
            pending_retry: None,
            queued: None,
        }
    }

    /// Start over for a new conversation: the next append counts as an
    /// initial load and the view is assumed to sit at the bottom.
    pub fn reset_session(&mut self) {
        self.has_auto_scrolled = false;
        self.user_near_bottom = true;
        self.new_content_below = false;
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn has_pending_retry(&self) -> bool {
        self.pending_retry.is_some()
    }

    /// Record `request` as the newest intent and drop any pending retry.
    ///
    /// Returns `true` when a frame task is already waiting; it will apply this
    /// request in place of the ones queued before it.
    pub(crate) fn queue_request(&mut self, request: ScrollRequest) -> bool {
        if let Some(retry) = self.pending_retry.take() {
            retry.cancel();
        }
        self.queued = Some(request);
        self.pending_frame.as_ref().is_some_and(|frame| !frame.is_finished())
    }

    /// Called by the frame task when it fires: releases the frame slot and
    /// hands over the newest intent.
    pub(crate) fn take_request(&mut self) -> Option<ScrollRequest> {
        self.pending_frame = None;
        self.queued.take()
    }

    /// Arm a retry, cancelling one left over from an earlier frame.
    pub(crate) fn set_retry(&mut self, retry: ScheduledTask) {
        if let Some(stale) = self.pending_retry.replace(retry) {
            stale.cancel();
        }
    }
}

impl Default for ChatScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Stickiness state of one log stream view.
#[derive(Debug)]
pub struct LogsScrollState {
    pub at_bottom: bool,
    pub(crate) pending_frame: Option<ScheduledTask>,
    /// `force` of the newest request.
    queued: Option<bool>,
}

impl LogsScrollState {
    pub fn new() -> Self {
        Self { at_bottom: true, pending_frame: None, queued: None }
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Same contract as [`ChatScrollState::queue_request`].
    pub(crate) fn queue_request(&mut self, force: bool) -> bool {
        self.queued = Some(force);
        self.pending_frame.as_ref().is_some_and(|frame| !frame.is_finished())
    }

    pub(crate) fn take_request(&mut self) -> Option<bool> {
        self.pending_frame = None;
        self.queued.take()
    }
}

impl Default for LogsScrollState {
    fn default() -> Self {
        Self::new()
    }
}
