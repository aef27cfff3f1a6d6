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

//! Scroll stickiness for the chat transcript and the log stream.

pub mod decision;
mod policy;
mod scheduler;
mod state;
pub mod target;
mod threshold;
mod topbar;

pub use decision::StickDecision;
pub use policy::{DEFAULT_FORCED_RETRY_DELAY, DEFAULT_RETRY_DELAY, ScrollPolicy};
pub use scheduler::ScrollRequest;
pub use state::{ChatScrollState, LogsScrollState, ScheduledTask};
pub use threshold::{
    Geometry, LOGS_NEAR_BOTTOM_THRESHOLD, NEAR_BOTTOM_THRESHOLD, is_near_bottom,
    is_near_bottom_within,
};
pub use topbar::TOPBAR_HEIGHT_PROPERTY;

use crate::host::{FrameClock, Platform, ResizeSubscription, ScrollElement, ScrollHost};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// A scroll event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    current_target: Option<Geometry>,
}

impl ScrollEvent {
    pub const fn new(geometry: Geometry) -> Self {
        Self { current_target: Some(geometry) }
    }

    pub fn from_element(element: &dyn ScrollElement) -> Self {
        Self::new(element.geometry())
    }

    /// An event whose target is already gone.
    pub const fn detached() -> Self {
        Self { current_target: None }
    }

    pub const fn geometry(&self) -> Option<Geometry> {
        self.current_target
    }
}

/// Per-view scroll controller: owns the stickiness state of one chat view and
/// one log view and schedules scroll work against the host.
///
/// All scheduling spawns onto the current `tokio::task::LocalSet`.
pub struct ScrollController<H> {
    host: Rc<H>,
    frames: Rc<dyn FrameClock>,
    platform: Platform,
    policy: ScrollPolicy,
    chat: Rc<RefCell<ChatScrollState>>,
    logs: Rc<RefCell<LogsScrollState>>,
    topbar_observer: Option<ResizeSubscription>,
}

impl<H: ScrollHost + 'static> ScrollController<H> {
    pub fn new(host: Rc<H>, frames: Rc<dyn FrameClock>) -> Self {
        Self {
            host,
            frames,
            platform: Platform::headless(),
            policy: ScrollPolicy::default(),
            chat: Rc::new(RefCell::new(ChatScrollState::new())),
            logs: Rc::new(RefCell::new(LogsScrollState::new())),
            topbar_observer: None,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ScrollPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    pub fn policy(&self) -> ScrollPolicy {
        self.policy
    }

    pub fn chat(&self) -> Ref<'_, ChatScrollState> {
        self.chat.borrow()
    }

    /// Do not hold the guard across an await; scheduled tasks borrow the same state.
    pub fn chat_mut(&self) -> RefMut<'_, ChatScrollState> {
        self.chat.borrow_mut()
    }

    pub fn logs(&self) -> Ref<'_, LogsScrollState> {
        self.logs.borrow()
    }

    pub fn logs_mut(&self) -> RefMut<'_, LogsScrollState> {
        self.logs.borrow_mut()
    }

    pub fn handle_chat_scroll(&self, event: &ScrollEvent) {
        let Some(geometry) = event.geometry() else {
            return;
        };
        let distance = geometry.distance_from_bottom();
        let mut chat = self.chat.borrow_mut();
        decision::record_user_scroll(&mut chat, distance, self.policy.chat_near_bottom_px);
        tracing::trace!(distance, near = chat.user_near_bottom, "chat scroll");
    }

    pub fn handle_logs_scroll(&self, event: &ScrollEvent) {
        let Some(geometry) = event.geometry() else {
            return;
        };
        let distance = geometry.distance_from_bottom();
        let mut logs = self.logs.borrow_mut();
        logs.at_bottom = is_near_bottom_within(distance, self.policy.logs_near_bottom_px);
        tracing::trace!(distance, at_bottom = logs.at_bottom, "logs scroll");
    }

    /// Begin a new conversation. Pending scroll work is left alone; it reads
    /// the reset flags when it fires.
    pub fn reset_chat_scroll(&self) {
        self.chat.borrow_mut().reset_session();
        tracing::debug!("chat scroll state reset for new session");
    }
}
