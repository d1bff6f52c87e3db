//! Widgets: the interactive controls hosted on a control surface.
//!
//! This module defines the core `Widget` trait that all controls
//! implement, plus the menu widget itself. Widgets are driven entirely
//! by gesture events and value writes; rendering is left to the host,
//! which reads widget state through accessor methods and projections
//! like [`SegmentView`].

mod menu;

pub use menu::{Menu, SegmentView};

use std::time::Instant;

use bitflags::bitflags;

use crate::gesture::GestureEvent;
use crate::layout::HitTarget;
use crate::value::Value;

/// Identifies a widget within its control surface.
///
/// Ids are assigned by insertion order and stay stable across removals,
/// matching the index-keyed state snapshot format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u16);

impl WidgetId {
    /// Create a widget id.
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// The id as a slot index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    /// How a value write propagates beyond the widget.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SyncFlags: u8 {
        /// Emit the value to remote targets.
        const SEND = 0b01;
        /// Notify local listeners of the change.
        const SYNC = 0b10;
    }
}

/// An interactive control hosted on a control surface.
///
/// All widgets implement this trait, allowing the surface to route
/// gestures, value writes, and state snapshots uniformly.
pub trait Widget {
    /// This widget's id within its surface.
    fn id(&self) -> WidgetId;

    /// Resolve a widget-local point to a hit target.
    fn resolve(&self, x: f64, y: f64) -> HitTarget;

    /// Handle a gesture event.
    ///
    /// Returns `true` if the event changed widget state, `false` if it
    /// was ignored.
    fn handle_gesture(&mut self, event: &GestureEvent, now: Instant) -> bool;

    /// The widget's current value, if one has been set.
    fn current_value(&self) -> Option<&Value>;

    /// Write the widget's value.
    fn set_value(&mut self, value: Value, flags: SyncFlags);

    /// True when this widget listens to document-wide fast taps.
    fn wants_global_taps(&self) -> bool {
        false
    }

    /// Check if this widget needs to be redrawn.
    fn needs_redraw(&self) -> bool;

    /// Clear the redraw flag after rendering.
    fn clear_redraw(&mut self);
}
