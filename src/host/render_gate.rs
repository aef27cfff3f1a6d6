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
use std::future::Future;
use tokio::sync::watch;

/// Tracks whether the view has rendered everything appended so far.
///
/// Appends call [`RenderGate::invalidate`]; the renderer calls
/// [`RenderGate::mark_rendered`] after a draw. [`RenderGate::wait`] resolves
/// once the draw covering every earlier invalidation has happened, or
/// immediately when nothing is outstanding.
pub struct RenderGate {
    requested: Cell<u64>,
    rendered_tx: watch::Sender<u64>,
}

impl RenderGate {
    pub fn new() -> Self {
        let (rendered_tx, _) = watch::channel(0);
        Self { requested: Cell::new(0), rendered_tx }
    }

    /// Record that new content awaits rendering. Returns the new generation.
    pub fn invalidate(&self) -> u64 {
        let next = self.requested.get() + 1;
        self.requested.set(next);
        next
    }

    /// Record that the latest requested generation is now on screen.
    pub fn mark_rendered(&self) {
        let requested = self.requested.get();
        self.rendered_tx.send_if_modified(|rendered| {
            if *rendered == requested {
                return false;
            }
            *rendered = requested;
            true
        });
    }

    pub fn is_dirty(&self) -> bool {
        *self.rendered_tx.borrow() < self.requested.get()
    }

    /// Wait until everything requested before this call has rendered.
    pub fn wait(&self) -> impl Future<Output = ()> + 'static {
        let wanted = self.requested.get();
        let mut rendered_rx = self.rendered_tx.subscribe();
        async move {
            // A closed channel means the host is gone; nothing left to wait for.
            let _ = rendered_rx.wait_for(|rendered| *rendered >= wanted).await;
        }
    }
}

impl Default for RenderGate {
    fn default() -> Self {
        Self::new()
    }
}
