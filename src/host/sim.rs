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

//! In-memory host used by the terminal viewer and by tests.
//!
//! `SimElement` behaves like a DOM scroll container reduced to the numbers the
//! scroll core reads. Setting `scroll_top` stores the value as given; the owner
//! clamps it on layout via [`SimElement::clamp_scroll`], the way a browser
//! clamps on the next layout pass.

use super::{
    ElementRef, Overflow, Region, RenderGate, ResizeObservation, ResizeSubscription,
    ScrollBehavior, ScrollElement, ScrollHost,
};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

/// Fraction of the remaining distance covered per animation step.
const SMOOTH_STEP: f64 = 0.5;
/// Remaining distance below which an animation snaps to its target.
const SMOOTH_SNAP_PX: f64 = 0.5;

#[derive(Debug)]
pub struct SimElement {
    scroll_height: Cell<f64>,
    scroll_top: Cell<f64>,
    client_height: Cell<f64>,
    bounding_height: Cell<f64>,
    overflow: Cell<Overflow>,
    /// Elements without `scroll_to` only support direct `scroll_top` writes.
    animates: bool,
    smooth_target: Cell<Option<f64>>,
    last_behavior: Cell<Option<ScrollBehavior>>,
    writes: Cell<usize>,
}

impl SimElement {
    pub fn new(scroll_height: f64, scroll_top: f64, client_height: f64) -> Self {
        Self {
            scroll_height: Cell::new(scroll_height),
            scroll_top: Cell::new(scroll_top),
            client_height: Cell::new(client_height),
            bounding_height: Cell::new(client_height),
            overflow: Cell::new(Overflow::Auto),
            animates: true,
            smooth_target: Cell::new(None),
            last_behavior: Cell::new(None),
            writes: Cell::new(0),
        }
    }

    #[must_use]
    pub fn with_overflow(self, overflow: Overflow) -> Self {
        self.overflow.set(overflow);
        self
    }

    /// An element that can only jump (no `scroll_to`).
    #[must_use]
    pub fn without_animation(mut self) -> Self {
        self.animates = false;
        self
    }

    pub fn shared(self) -> Rc<Self> {
        Rc::new(self)
    }

    pub fn set_scroll_height(&self, height: f64) {
        self.scroll_height.set(height);
    }

    pub fn set_client_height(&self, height: f64) {
        self.client_height.set(height);
    }

    pub fn set_bounding_height(&self, height: f64) {
        self.bounding_height.set(height);
    }

    pub fn set_overflow(&self, overflow: Overflow) {
        self.overflow.set(overflow);
    }

    /// Largest reachable `scroll_top` for the current content.
    pub fn max_scroll_top(&self) -> f64 {
        (self.scroll_height.get() - self.client_height.get()).max(0.0)
    }

    /// Clamp `scroll_top` (and any animation target) into `[0, max]`.
    pub fn clamp_scroll(&self) {
        let max = self.max_scroll_top();
        self.scroll_top.set(self.scroll_top.get().clamp(0.0, max));
        if let Some(target) = self.smooth_target.get() {
            self.smooth_target.set(Some(target.clamp(0.0, max)));
        }
    }

    /// Advance a running smooth scroll by one frame. Returns `true` while the
    /// animation is still moving.
    pub fn step_animation(&self) -> bool {
        let Some(target) = self.smooth_target.get() else {
            return false;
        };
        let current = self.scroll_top.get();
        let delta = target - current;
        if delta.abs() < SMOOTH_SNAP_PX {
            self.scroll_top.set(target);
            self.smooth_target.set(None);
            return false;
        }
        self.scroll_top.set(current + delta * SMOOTH_STEP);
        true
    }

    pub fn is_animating(&self) -> bool {
        self.smooth_target.get().is_some()
    }

    /// Behavior of the last `scroll_to` call, if any.
    pub fn last_behavior(&self) -> Option<ScrollBehavior> {
        self.last_behavior.get()
    }

    /// Number of scroll writes the core performed on this element.
    pub fn scroll_writes(&self) -> usize {
        self.writes.get()
    }

    /// Move the viewport as a user would (wheel, keys), cancelling animation.
    pub fn user_scroll_to(&self, top: f64) {
        self.smooth_target.set(None);
        self.scroll_top.set(top.clamp(0.0, self.max_scroll_top()));
    }
}

impl ScrollElement for SimElement {
    fn scroll_height(&self) -> f64 {
        self.scroll_height.get()
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top.get()
    }

    fn client_height(&self) -> f64 {
        self.client_height.get()
    }

    fn overflow_y(&self) -> Overflow {
        self.overflow.get()
    }

    fn bounding_height(&self) -> f64 {
        self.bounding_height.get()
    }

    fn set_scroll_top(&self, top: f64) {
        self.writes.set(self.writes.get() + 1);
        self.smooth_target.set(None);
        self.scroll_top.set(top);
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        if !self.animates {
            self.set_scroll_top(top);
            return;
        }
        self.last_behavior.set(Some(behavior));
        match behavior {
            ScrollBehavior::Instant => self.set_scroll_top(top),
            ScrollBehavior::Smooth => {
                self.writes.set(self.writes.get() + 1);
                self.smooth_target.set(Some(top));
            }
        }
    }
}

/// A host whose regions are plain [`SimElement`]s.
#[derive(Default)]
pub struct SimHost {
    regions: RefCell<HashMap<Region, Rc<SimElement>>>,
    scrolling_element: RefCell<Option<Rc<SimElement>>>,
    root_element: RefCell<Option<Rc<SimElement>>>,
    styles: RefCell<BTreeMap<String, String>>,
    render: RenderGate,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, region: Region, element: Rc<SimElement>) {
        self.regions.borrow_mut().insert(region, element);
    }

    pub fn remove(&self, region: Region) -> Option<Rc<SimElement>> {
        self.regions.borrow_mut().remove(&region)
    }

    pub fn element(&self, region: Region) -> Option<Rc<SimElement>> {
        self.regions.borrow().get(&region).cloned()
    }

    pub fn set_scrolling_element(&self, element: Option<Rc<SimElement>>) {
        *self.scrolling_element.borrow_mut() = element;
    }

    pub fn set_root_element(&self, element: Option<Rc<SimElement>>) {
        *self.root_element.borrow_mut() = element;
    }

    pub fn style_property(&self, name: &str) -> Option<String> {
        self.styles.borrow().get(name).cloned()
    }

    pub fn render_gate(&self) -> &RenderGate {
        &self.render
    }
}

fn as_element_ref(element: Rc<SimElement>) -> ElementRef {
    element
}

#[async_trait::async_trait(?Send)]
impl ScrollHost for SimHost {
    async fn update_complete(&self) {
        self.render.wait().await;
    }

    fn query(&self, region: Region) -> Option<ElementRef> {
        self.element(region).map(as_element_ref)
    }

    fn scrolling_element(&self) -> Option<ElementRef> {
        self.scrolling_element.borrow().clone().map(as_element_ref)
    }

    fn root_element(&self) -> Option<ElementRef> {
        self.root_element.borrow().clone().map(as_element_ref)
    }

    fn set_style_property(&self, name: &str, value: &str) {
        self.styles.borrow_mut().insert(name.to_owned(), value.to_owned());
    }
}

type ResizeCallbacks = Rc<RefCell<Vec<(u64, Rc<dyn Fn()>)>>>;

/// Resize observation driven by the host: call [`SimResize::notify`] when
/// layout changed (e.g. on a terminal resize event).
#[derive(Default)]
pub struct SimResize {
    callbacks: ResizeCallbacks,
    next_id: Cell<u64>,
}

impl SimResize {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a resize notification to every live observer.
    pub fn notify(&self) {
        // Snapshot so callbacks may subscribe or unsubscribe while running.
        let callbacks: Vec<_> =
            self.callbacks.borrow().iter().map(|(_, cb)| Rc::clone(cb)).collect();
        for callback in callbacks {
            callback();
        }
    }

    pub fn observer_count(&self) -> usize {
        self.callbacks.borrow().len()
    }
}

impl ResizeObservation for SimResize {
    fn observe(&self, _target: ElementRef, on_resize: Rc<dyn Fn()>) -> ResizeSubscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.callbacks.borrow_mut().push((id, on_resize));
        let callbacks = Rc::clone(&self.callbacks);
        ResizeSubscription::new(move || {
            callbacks.borrow_mut().retain(|(entry, _)| *entry != id);
        })
    }
}
