//! Gesture handling: pointer events, double-tap detection, and the
//! interaction state machine.
//!
//! Hosts translate their input sources into [`GestureEvent`]s and feed
//! them to widgets. The [`GestureMachine`] turns those events into
//! [`GestureAction`]s according to the widget's interaction mode; it
//! never touches widget state itself, so every transition is testable as
//! a pure event-in, actions-out step.

mod double_tap;
mod machine;

pub use double_tap::{DoubleTapDetector, DOUBLE_TAP_WINDOW};
pub use machine::{GestureAction, GestureMachine};

use crate::layout::HitTarget;

/// A pointer event's resolved target and position.
///
/// `target` is the direct hit at dispatch time. `point` carries the
/// surface-local coordinates when the input source knows them; touch
/// input re-resolves moves by point, since the finger slides across
/// segments while the gesture's original target stays fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// Direct target at dispatch time.
    pub target: HitTarget,
    /// Surface-local point, when the input source knows it.
    pub point: Option<(f64, f64)>,
    /// True for touch-style input.
    pub touch: bool,
}

impl Pointer {
    /// A pointer with a direct target and no point.
    pub const fn new(target: HitTarget) -> Self {
        Self {
            target,
            point: None,
            touch: false,
        }
    }

    /// A mouse-style pointer with target and point.
    pub const fn at(target: HitTarget, x: f64, y: f64) -> Self {
        Self {
            target,
            point: Some((x, y)),
            touch: false,
        }
    }

    /// A touch-style pointer with target and point.
    pub const fn touch_at(target: HitTarget, x: f64, y: f64) -> Self {
        Self {
            target,
            point: Some((x, y)),
            touch: true,
        }
    }

    /// A pointer that missed the widget entirely.
    pub const fn outside() -> Self {
        Self::new(HitTarget::Outside)
    }
}

/// A gesture lifecycle event delivered to a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// A press began.
    DragInit(Pointer),
    /// The pointer moved while pressed.
    DragMove(Pointer),
    /// The press was released.
    DragEnd(Pointer),
    /// A quick press-and-release anywhere on the document, delivered to
    /// widgets that subscribe to global taps.
    FastTap(Pointer),
}

impl GestureEvent {
    /// The pointer carried by this event.
    pub const fn pointer(&self) -> &Pointer {
        match self {
            Self::DragInit(p) | Self::DragMove(p) | Self::DragEnd(p) | Self::FastTap(p) => p,
        }
    }
}
