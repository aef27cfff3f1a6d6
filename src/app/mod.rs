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

mod events;
mod feed;
mod state;

pub use events::{handle_feed_event, handle_terminal_event};
pub use feed::{FeedEvent, FeedSource, SyntheticFeed, load_script, parse_script, spawn_feed};
pub use state::{App, AppConfig, Pane};

use crate::error::AppError;
use crossterm::event::EventStream;
use futures::{FutureExt as _, StreamExt};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::{Duration, Instant};

/// Draw one frame and tell the scroll core it is on screen.
pub fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    terminal
        .draw(|f| crate::ui::render(f, app))
        .map_err(|e| anyhow::Error::new(AppError::TerminalFailed).context(e.to_string()))?;
    app.finish_frame();
    Ok(())
}

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

/// Must run inside a `LocalSet`.
pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::try_init()
        .map_err(|e| anyhow::Error::new(AppError::TerminalFailed).context(e.to_string()))?;

    // Ignore errors on terminals without mouse support
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture);

    let mut events = EventStream::new();
    let tick_duration = Duration::from_millis(16);
    let mut last_render = Instant::now();

    let result = loop {
        // Phase 1: wait for at least one event or the next frame tick
        let time_to_next = tick_duration.saturating_sub(last_render.elapsed());
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                events::handle_terminal_event(app, event);
            }
            Some(event) = app.feed_rx.recv() => {
                events::handle_feed_event(app, event);
            }
            () = tokio::time::sleep(time_to_next) => {}
        }

        // Phase 2: drain all remaining queued events (non-blocking)
        loop {
            if let Some(Some(Ok(event))) = events.next().now_or_never() {
                events::handle_terminal_event(app, event);
                continue;
            }
            match app.feed_rx.try_recv() {
                Ok(event) => events::handle_feed_event(app, event),
                Err(_) => break,
            }
        }

        if app.should_quit {
            break Ok(());
        }

        // Phase 3: render once, then release scroll work waiting on it
        if let Err(e) = draw(&mut terminal, app) {
            break Err(e);
        }
        last_render = Instant::now();
    };

    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    ratatui::restore();
    result
}
