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

use std::cell::Cell;
use std::time::Duration;
use tokio::sync::watch;

/// Source of "next paint opportunity" notifications.
#[async_trait::async_trait(?Send)]
pub trait FrameClock {
    /// Resolves at the next frame after the call.
    async fn next_frame(&self);
}

/// Frame clock driven by the host's render loop.
///
/// The loop calls [`TickFrames::tick`] after every draw; waiters resume on the
/// first tick that happens after they started waiting.
pub struct TickFrames {
    frame_tx: watch::Sender<u64>,
    count: Cell<u64>,
}

impl TickFrames {
    pub fn new() -> Self {
        let (frame_tx, _) = watch::channel(0);
        Self { frame_tx, count: Cell::new(0) }
    }

    pub fn tick(&self) {
        let next = self.count.get().wrapping_add(1);
        self.count.set(next);
        self.frame_tx.send_replace(next);
    }

    /// Number of frames ticked so far.
    pub fn frame_count(&self) -> u64 {
        self.count.get()
    }
}

impl Default for TickFrames {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait(?Send)]
impl FrameClock for TickFrames {
    async fn next_frame(&self) {
        let seen = self.count.get();
        let mut frame_rx = self.frame_tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = frame_rx.wait_for(|frame| *frame != seen).await;
    }
}

/// Frame clock with a fixed period, for hosts without a render loop.
#[derive(Debug, Clone, Copy)]
pub struct TimerFrames {
    period: Duration,
}

impl TimerFrames {
    /// Yield once and resume; the frame is "now".
    pub const fn new() -> Self {
        Self { period: Duration::ZERO }
    }

    pub const fn every(period: Duration) -> Self {
        Self { period }
    }
}

impl Default for TimerFrames {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait(?Send)]
impl FrameClock for TimerFrames {
    async fn next_frame(&self) {
        if self.period.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.period).await;
        }
    }
}
