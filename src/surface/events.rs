//! Value events widgets emit toward the host.

use crossbeam_channel::Sender;

use crate::value::Value;
use crate::widget::WidgetId;

/// A value event emitted by a widget.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// The widget emitted its value toward remote targets.
    ValueSent {
        /// Emitting widget.
        id: WidgetId,
        /// The emitted value.
        value: Value,
    },
    /// The widget's value changed and local listeners should react.
    ValueChanged {
        /// Changed widget.
        id: WidgetId,
        /// The new value.
        value: Value,
        /// True when the same write also emitted remotely.
        sent: bool,
    },
}

/// A widget's handle for emitting value events.
///
/// Sends never block. If the surface's receiver is gone the event is
/// dropped; a detached widget has nobody left to tell.
#[derive(Debug, Clone)]
pub struct Outbox {
    id: WidgetId,
    events: Sender<ControlEvent>,
}

impl Outbox {
    /// Outbox for `id`, emitting into `events`.
    pub const fn new(id: WidgetId, events: Sender<ControlEvent>) -> Self {
        Self { id, events }
    }

    /// The widget this outbox belongs to.
    pub const fn id(&self) -> WidgetId {
        self.id
    }

    /// Emit the value toward remote targets.
    pub fn send_value(&self, value: &Value) {
        let _ = self.events.send(ControlEvent::ValueSent {
            id: self.id,
            value: value.clone(),
        });
    }

    /// Notify local listeners of a change.
    pub fn changed(&self, value: &Value, sent: bool) {
        let _ = self.events.send(ControlEvent::ValueChanged {
            id: self.id,
            value: value.clone(),
            sent,
        });
    }
}
