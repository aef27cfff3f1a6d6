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

pub mod app;
pub mod chat;
pub mod error;
pub mod host;
pub mod logs;
pub mod scroll;
pub mod ui;

use clap::Parser;
use scroll::{LOGS_NEAR_BOTTOM_THRESHOLD, NEAR_BOTTOM_THRESHOLD, ScrollPolicy};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "sticky-demo", about = "Terminal viewer for auto-following chat and log streams")]
pub struct Cli {
    /// Distance from the bottom (px) under which the chat counts as "at the bottom"
    #[arg(long, default_value_t = NEAR_BOTTOM_THRESHOLD)]
    pub near_bottom_px: f64,

    /// Distance from the bottom (px) under which the log stream keeps following
    #[arg(long, default_value_t = LOGS_NEAR_BOTTOM_THRESHOLD)]
    pub logs_near_bottom_px: f64,

    /// Delay before the late re-stick for content that grows after a scroll
    #[arg(long, default_value_t = 120)]
    pub retry_ms: u64,

    /// Late re-stick delay for the first forced scroll of a session
    #[arg(long, default_value_t = 150)]
    pub forced_retry_ms: u64,

    /// Pixels per terminal row used to map rows onto scroll geometry
    #[arg(long, default_value_t = 18.0)]
    pub cell_height: f64,

    /// Never animate scrolls
    #[arg(long, env = "STICKY_REDUCED_MOTION")]
    pub reduced_motion: bool,

    /// Replay messages from a JSONL file instead of the synthetic feed
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Directory for `e` log exports (defaults to the download folder)
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Delay between feed items
    #[arg(long, default_value_t = 250)]
    pub feed_interval_ms: u64,

    /// Write tracing diagnostics to a file (disabled unless explicitly set)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Tracing filter directives (example: `info,sticky_scroll::scroll=trace`)
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to `--log-file` instead of truncating
    #[arg(long)]
    pub log_append: bool,
}

impl Cli {
    pub fn policy(&self) -> ScrollPolicy {
        ScrollPolicy {
            chat_near_bottom_px: self.near_bottom_px,
            logs_near_bottom_px: self.logs_near_bottom_px,
            retry_delay: Duration::from_millis(self.retry_ms),
            forced_retry_delay: Duration::from_millis(self.forced_retry_ms),
        }
    }

    pub fn feed_interval(&self) -> Duration {
        Duration::from_millis(self.feed_interval_ms)
    }
}
