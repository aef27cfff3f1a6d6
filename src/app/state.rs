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

use super::feed::FeedEvent;
use crate::Cli;
use crate::chat::NormalizedMessage;
use crate::host::sim::{SimElement, SimHost, SimResize};
use crate::host::{FixedMotion, Platform, Region, ScrollElement, TickFrames};
use crate::logs;
use crate::scroll::{ScrollController, ScrollEvent, ScrollPolicy, TOPBAR_HEIGHT_PROPERTY};
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::rc::Rc;
use tokio::sync::mpsc;

/// Label used in exported log file names.
const EXPORT_LABEL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Chat,
    Logs,
}

impl Pane {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Chat => Self::Logs,
            Self::Logs => Self::Chat,
        }
    }
}

/// Settings the viewer needs from the command line.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub policy: ScrollPolicy,
    /// Pixels per terminal row.
    pub cell_height: f64,
    pub reduced_motion: bool,
    pub export_dir: PathBuf,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            policy: cli.policy(),
            cell_height: cli.cell_height.max(1.0),
            reduced_motion: cli.reduced_motion,
            export_dir: cli.export_dir.clone().unwrap_or_else(logs::default_export_dir),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            policy: ScrollPolicy::default(),
            cell_height: 18.0,
            reduced_motion: false,
            export_dir: logs::default_export_dir(),
        }
    }
}

pub struct App {
    pub messages: Vec<NormalizedMessage>,
    pub logs: Vec<String>,
    pub focus: Pane,
    /// Counts `n` presses; shown in the header.
    pub session: u32,
    pub should_quit: bool,
    /// Render long tool results pretty-printed instead of as a preview.
    pub tools_expanded: bool,
    /// One-shot status text shown under the header (export results).
    pub notice: Option<String>,
    pub export_dir: PathBuf,
    pub cell_height: f64,
    pub scroll: ScrollController<SimHost>,
    pub host: Rc<SimHost>,
    pub chat_view: Rc<SimElement>,
    pub logs_view: Rc<SimElement>,
    pub topbar: Rc<SimElement>,
    pub frames: Rc<TickFrames>,
    pub resize: Rc<SimResize>,
    pub feed_tx: mpsc::UnboundedSender<FeedEvent>,
    pub feed_rx: mpsc::UnboundedReceiver<FeedEvent>,
    /// Areas from the last draw, for mouse hit-testing.
    pub chat_area: Rect,
    pub logs_area: Rect,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let host = Rc::new(SimHost::new());
        let chat_view = SimElement::new(0.0, 0.0, 0.0).shared();
        let logs_view = SimElement::new(0.0, 0.0, 0.0).shared();
        let topbar = SimElement::new(0.0, 0.0, 0.0).shared();
        topbar.set_bounding_height(config.cell_height);
        host.insert(Region::ChatThread, Rc::clone(&chat_view));
        host.insert(Region::LogStream, Rc::clone(&logs_view));
        host.insert(Region::Topbar, Rc::clone(&topbar));

        let frames = Rc::new(TickFrames::new());
        let resize = Rc::new(SimResize::new());
        let mut platform = Platform::headless().with_resize(resize.clone());
        if config.reduced_motion {
            platform = platform.with_reduced_motion(Rc::new(FixedMotion(true)));
        }
        let mut scroll = ScrollController::new(Rc::clone(&host), frames.clone())
            .with_policy(config.policy)
            .with_platform(platform);
        scroll.observe_topbar();

        let (feed_tx, feed_rx) = mpsc::unbounded_channel();
        Self {
            messages: Vec::new(),
            logs: Vec::new(),
            focus: Pane::Chat,
            session: 1,
            should_quit: false,
            tools_expanded: false,
            notice: None,
            export_dir: config.export_dir,
            cell_height: config.cell_height,
            scroll,
            host,
            chat_view,
            logs_view,
            topbar,
            frames,
            resize,
            feed_tx,
            feed_rx,
            chat_area: Rect::default(),
            logs_area: Rect::default(),
        }
    }

    /// Append a chat message and ask the scroll core to follow it.
    ///
    /// Until the session's first auto-scroll lands, appends are the initial
    /// load: forced and instant. Later ones animate. Must run inside a `LocalSet`.
    pub fn push_message(&mut self, message: NormalizedMessage) {
        let initial_load = !self.scroll.chat().has_auto_scrolled;
        self.messages.push(message);
        self.host.render_gate().invalidate();
        self.scroll.schedule_chat_scroll(initial_load, !initial_load);
    }

    /// Must run inside a `LocalSet`.
    pub fn push_log(&mut self, line: String) {
        self.logs.push(line);
        self.host.render_gate().invalidate();
        self.scroll.schedule_logs_scroll(false);
    }

    /// Start a new conversation: clear the transcript and reset stickiness.
    pub fn new_session(&mut self) {
        self.messages.clear();
        self.chat_view.user_scroll_to(0.0);
        self.scroll.reset_chat_scroll();
        self.host.render_gate().invalidate();
        self.session += 1;
        tracing::info!(session = self.session, "started new session");
    }

    /// Must run inside a `LocalSet`.
    pub fn toggle_tools_expanded(&mut self) {
        self.tools_expanded = !self.tools_expanded;
        self.host.render_gate().invalidate();
        self.scroll.schedule_chat_scroll(false, false);
    }

    pub fn export_logs(&mut self) {
        let notice = match logs::export_logs(&self.logs, EXPORT_LABEL, &self.export_dir) {
            Ok(Some(path)) => {
                format!("Exported {} log lines to {}", self.logs.len(), path.display())
            }
            Ok(None) => "No log lines to export".to_owned(),
            Err(e) => {
                tracing::warn!(error = %e, "log export failed");
                format!("Export failed: {e}")
            }
        };
        self.notice = Some(notice);
    }

    pub fn view(&self, pane: Pane) -> &Rc<SimElement> {
        match pane {
            Pane::Chat => &self.chat_view,
            Pane::Logs => &self.logs_view,
        }
    }

    /// Move a pane as the user would and report the scroll to the core.
    pub fn scroll_pane_to(&self, pane: Pane, top: f64) {
        let view = self.view(pane);
        view.user_scroll_to(top);
        let event = ScrollEvent::from_element(view.as_ref());
        match pane {
            Pane::Chat => self.scroll.handle_chat_scroll(&event),
            Pane::Logs => self.scroll.handle_logs_scroll(&event),
        }
    }

    pub fn scroll_pane_by_rows(&self, pane: Pane, rows: f64) {
        let top = self.view(pane).scroll_top() + rows * self.cell_height;
        self.scroll_pane_to(pane, top);
    }

    /// Rows visible in a pane, from the last layout.
    pub fn viewport_rows(&self, pane: Pane) -> f64 {
        (self.view(pane).client_height() / self.cell_height).floor()
    }

    /// Feed the pane's laid-out size into its element, advance any running
    /// animation and return the first visible content row.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn layout_view(&self, pane: Pane, content_rows: usize, viewport_rows: u16) -> usize {
        let view = self.view(pane);
        let viewport_rows = f64::from(viewport_rows);
        let content_rows = (content_rows as f64).max(viewport_rows);
        view.set_scroll_height(content_rows * self.cell_height);
        view.set_client_height(viewport_rows * self.cell_height);
        view.step_animation();
        view.clamp_scroll();
        (view.scroll_top() / self.cell_height).round() as usize
    }

    /// Report the header's drawn height; a change is delivered as a resize.
    pub fn set_header_rows(&self, rows: u16) {
        let height = f64::from(rows) * self.cell_height;
        if (self.topbar.bounding_height() - height).abs() < f64::EPSILON {
            return;
        }
        self.topbar.set_bounding_height(height);
        self.resize.notify();
    }

    /// Value of the published header height, e.g. `"18px"`.
    pub fn topbar_height(&self) -> Option<String> {
        self.host.style_property(TOPBAR_HEIGHT_PROPERTY)
    }

    /// Called after every draw: releases render waiters, then opens the next frame.
    pub fn finish_frame(&self) {
        self.host.render_gate().mark_rendered();
        self.frames.tick();
    }

    pub fn new_content_below(&self) -> bool {
        self.scroll.chat().new_content_below
    }

    pub fn logs_following(&self) -> bool {
        self.scroll.logs().at_bottom
    }
}
