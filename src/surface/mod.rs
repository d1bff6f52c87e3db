//! The control surface: widget registry, gesture routing, and value
//! events.
//!
//! A surface owns its widgets behind the [`Widget`] trait and a single
//! event channel their outboxes feed. Ids are slot indices assigned at
//! insertion and never reused, so the index-keyed snapshot format stays
//! valid across removals.
//!
//! Gesture routing comes in two scopes. [`ControlSurface::pointer`]
//! delivers a drag phase to one widget, resolving the point against that
//! widget's own surface first, the way a document resolves an event
//! target before handlers run. [`ControlSurface::fast_tap`] is
//! document-wide: every widget subscribed to global taps hears it, the
//! tapped widget with its own resolution and everyone else as an outside
//! tap. Subscription happens at insertion, based on the widget's mode at
//! construction, and is dropped exactly once at removal.

mod events;
mod input;
mod state;

pub use events::{ControlEvent, Outbox};
pub use input::{AdapterOutput, PointerAdapter, PointerPhase, ScreenRegion, FAST_TAP_DELAY};
pub use state::{parse_snapshot_line, restore, snapshot, RestoreStats, StateError};

use std::time::Instant;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::gesture::{GestureEvent, Pointer};
use crate::layout::HitTarget;
use crate::widget::{Widget, WidgetId};

/// A registry of live widgets sharing one event channel.
pub struct ControlSurface {
    widgets: Vec<Option<Box<dyn Widget>>>,
    tap_listeners: Vec<WidgetId>,
    events_tx: Sender<ControlEvent>,
    events_rx: Receiver<ControlEvent>,
}

impl ControlSurface {
    /// An empty surface.
    pub fn new() -> Self {
        let (events_tx, events_rx) = unbounded();
        Self {
            widgets: Vec::new(),
            tap_listeners: Vec::new(),
            events_tx,
            events_rx,
        }
    }

    /// Add a widget, assigning it the next id.
    ///
    /// The builder receives the id and an outbox wired to this surface's
    /// event channel. Widgets that want global taps are subscribed here,
    /// once, based on their mode at construction.
    pub fn add<F>(&mut self, build: F) -> WidgetId
    where
        F: FnOnce(WidgetId, Outbox) -> Box<dyn Widget>,
    {
        #[allow(clippy::cast_possible_truncation)]
        let id = WidgetId::new(self.widgets.len() as u16);
        let widget = build(id, Outbox::new(id, self.events_tx.clone()));
        if widget.wants_global_taps() {
            self.tap_listeners.push(id);
        }
        log::debug!("surface adds widget {}", id.0);
        self.widgets.push(Some(widget));
        id
    }

    /// Remove a widget, dropping it and its subscriptions.
    ///
    /// Returns false when the id is unknown or already removed; removing
    /// twice is a no-op, and the global-tap subscription goes away with
    /// the first removal.
    pub fn remove(&mut self, id: WidgetId) -> bool {
        match self.widgets.get_mut(id.index()) {
            Some(slot @ Some(_)) => {
                *slot = None;
                self.tap_listeners.retain(|listener| *listener != id);
                log::debug!("surface removes widget {}", id.0);
                true
            }
            _ => false,
        }
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.widgets.iter().filter(|slot| slot.is_some()).count()
    }

    /// True when no widgets are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The widget behind `id`, if it is live.
    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets.get(id.index())?.as_deref()
    }

    /// Mutable access to the widget behind `id`.
    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut dyn Widget> {
        match self.widgets.get_mut(id.index()) {
            Some(Some(widget)) => Some(widget.as_mut()),
            _ => None,
        }
    }

    /// Iterate over live widgets in id order.
    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, &dyn Widget)> {
        self.widgets.iter().enumerate().filter_map(|(index, slot)| {
            #[allow(clippy::cast_possible_truncation)]
            let id = WidgetId::new(index as u16);
            slot.as_deref().map(|widget| (id, widget))
        })
    }

    /// The receiving end of the surface's event channel.
    pub const fn events(&self) -> &Receiver<ControlEvent> {
        &self.events_rx
    }

    /// Deliver a gesture event to one widget.
    pub fn dispatch(&mut self, id: WidgetId, event: &GestureEvent, now: Instant) -> bool {
        self.widget_mut(id)
            .is_some_and(|widget| widget.handle_gesture(event, now))
    }

    /// Deliver a pointer phase to one widget by widget-local point.
    ///
    /// The point is resolved against the widget's own surface before
    /// dispatch, so the gesture carries both the direct target and the
    /// point for touch re-resolution.
    pub fn pointer(
        &mut self,
        id: WidgetId,
        phase: PointerPhase,
        x: f64,
        y: f64,
        touch: bool,
        now: Instant,
    ) -> bool {
        let Some(widget) = self.widget(id) else {
            return false;
        };
        let pointer = Pointer {
            target: widget.resolve(x, y),
            point: Some((x, y)),
            touch,
        };
        let event = match phase {
            PointerPhase::Press => GestureEvent::DragInit(pointer),
            PointerPhase::Move => GestureEvent::DragMove(pointer),
            PointerPhase::Release => GestureEvent::DragEnd(pointer),
        };
        self.dispatch(id, &event, now)
    }

    /// Broadcast a document-wide fast tap.
    ///
    /// `at` names the widget the tap landed on, with widget-local
    /// coordinates, when it landed on one at all. Subscribed widgets
    /// other than that one hear an outside tap.
    pub fn fast_tap(
        &mut self,
        at: Option<(WidgetId, f64, f64)>,
        touch: bool,
        now: Instant,
    ) -> bool {
        let listeners = self.tap_listeners.clone();
        let mut any = false;
        for id in listeners {
            let pointer = match at {
                Some((tapped, x, y)) if tapped == id => {
                    let Some(widget) = self.widget(id) else {
                        continue;
                    };
                    Pointer {
                        target: widget.resolve(x, y),
                        point: Some((x, y)),
                        touch,
                    }
                }
                _ => Pointer {
                    target: HitTarget::Outside,
                    point: None,
                    touch,
                },
            };
            if let Some(widget) = self.widget_mut(id) {
                any |= widget.handle_gesture(&GestureEvent::FastTap(pointer), now);
            }
        }
        any
    }
}

impl Default for ControlSurface {
    fn default() -> Self {
        Self::new()
    }
}
