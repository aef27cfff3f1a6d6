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

//! Seams between the scroll core and the view that hosts it.
//!
//! The core never touches a real display surface. Render completion, element
//! lookup, geometry and frame timing come in through the traits below, and
//! optional platform capabilities through [`Platform`].

mod frame;
mod render_gate;
pub mod sim;

pub use frame::{FrameClock, TickFrames, TimerFrames};
pub use render_gate::RenderGate;

use crate::scroll::Geometry;
use std::rc::Rc;

/// Shared handle to a scrollable element owned by the host.
pub type ElementRef = Rc<dyn ScrollElement>;

/// Named regions of the hosting view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// The chat transcript container.
    ChatThread,
    /// The log stream container.
    LogStream,
    /// The fixed header above the transcript.
    Topbar,
}

/// Computed `overflow-y` of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Auto,
    Scroll,
}

impl Overflow {
    /// Whether this overflow mode lets the element scroll its own content.
    #[must_use]
    pub const fn allows_scrolling(self) -> bool {
        matches!(self, Self::Auto | Self::Scroll)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump straight to the position.
    Instant,
    /// Animate towards the position.
    Smooth,
}

/// A scrollable box as seen by the scroll core.
///
/// Setters take `&self`: elements are shared between the host and pending
/// scheduler tasks, so implementors use interior mutability.
pub trait ScrollElement {
    fn scroll_height(&self) -> f64;
    fn scroll_top(&self) -> f64;
    fn client_height(&self) -> f64;
    fn overflow_y(&self) -> Overflow;
    /// Rendered height of the element box itself.
    fn bounding_height(&self) -> f64;
    fn set_scroll_top(&self, top: f64);

    /// Scroll with the requested behavior. Elements that cannot animate keep
    /// this default and jump.
    fn scroll_to(&self, top: f64, _behavior: ScrollBehavior) {
        self.set_scroll_top(top);
    }

    fn geometry(&self) -> Geometry {
        Geometry::new(self.scroll_height(), self.scroll_top(), self.client_height())
    }
}

/// The view hosting one chat transcript and one log stream.
#[async_trait::async_trait(?Send)]
pub trait ScrollHost {
    /// Resolves once the view reflects the most recently appended content.
    async fn update_complete(&self);

    fn query(&self, region: Region) -> Option<ElementRef>;

    /// Element the platform reports as the document-level scroller.
    fn scrolling_element(&self) -> Option<ElementRef>;

    /// Root element of the document, used when no scroller is reported.
    fn root_element(&self) -> Option<ElementRef>;

    fn set_style_property(&self, name: &str, value: &str);
}

/// Reports the user's reduced-motion preference.
pub trait MotionQuery {
    fn prefers_reduced_motion(&self) -> bool;
}

/// Invokes a callback whenever an element's box changes size.
pub trait ResizeObservation {
    fn observe(&self, target: ElementRef, on_resize: Rc<dyn Fn()>) -> ResizeSubscription;
}

/// Live resize observation; dropping it stops delivery.
pub struct ResizeSubscription {
    on_drop: Option<Box<dyn FnOnce()>>,
}

impl ResizeSubscription {
    pub fn new(on_drop: impl FnOnce() + 'static) -> Self {
        Self { on_drop: Some(Box::new(on_drop)) }
    }

    /// A subscription with nothing to release.
    pub fn detached() -> Self {
        Self { on_drop: None }
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.on_drop.take() {
            release();
        }
    }
}

impl std::fmt::Debug for ResizeSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeSubscription").field("attached", &self.on_drop.is_some()).finish()
    }
}

/// Optional platform capabilities. `None` means the platform does not offer it.
#[derive(Clone, Default)]
pub struct Platform {
    pub reduced_motion: Option<Rc<dyn MotionQuery>>,
    pub resize: Option<Rc<dyn ResizeObservation>>,
}

impl Platform {
    /// No capabilities: motion allowed, no resize observation.
    pub fn headless() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_reduced_motion(mut self, query: Rc<dyn MotionQuery>) -> Self {
        self.reduced_motion = Some(query);
        self
    }

    #[must_use]
    pub fn with_resize(mut self, observer: Rc<dyn ResizeObservation>) -> Self {
        self.resize = Some(observer);
        self
    }

    /// Motion is allowed unless a query exists and asks for reduction.
    pub fn motion_allowed(&self) -> bool {
        self.reduced_motion.as_ref().is_none_or(|query| !query.prefers_reduced_motion())
    }
}

/// Fixed reduced-motion answer, e.g. from a CLI flag.
#[derive(Debug, Clone, Copy)]
pub struct FixedMotion(pub bool);

impl MotionQuery for FixedMotion {
    fn prefers_reduced_motion(&self) -> bool {
        self.0
    }
}
