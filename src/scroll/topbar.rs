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
use crate::host::{Region, ScrollHost};
use std::rc::Rc;

/// Style property carrying the measured header height for the layout.
pub const TOPBAR_HEIGHT_PROPERTY: &str = "--topbar-height";

impl<H: ScrollHost + 'static> ScrollController<H> {
    /// Publish the fixed header's height as [`TOPBAR_HEIGHT_PROPERTY`] and
    /// keep it current while the header resizes.
    ///
    /// Skipped when the platform cannot observe resizes or there is no header.
    /// Calling again replaces the previous observation.
    pub fn observe_topbar(&mut self) {
        let Some(resize) = self.platform.resize.clone() else {
            tracing::debug!("resize observation unavailable; topbar height not tracked");
            return;
        };
        let Some(topbar) = self.host.query(Region::Topbar) else {
            return;
        };

        let host = Rc::clone(&self.host);
        let measured = Rc::clone(&topbar);
        let update: Rc<dyn Fn()> = Rc::new(move || {
            let height = measured.bounding_height();
            host.set_style_property(TOPBAR_HEIGHT_PROPERTY, &format!("{height}px"));
        });
        update();
        self.topbar_observer = Some(resize.observe(topbar, update));
    }

    /// Stop tracking the header height.
    pub fn unobserve_topbar(&mut self) {
        self.topbar_observer = None;
    }

    pub fn is_observing_topbar(&self) -> bool {
        self.topbar_observer.is_some()
    }
}
