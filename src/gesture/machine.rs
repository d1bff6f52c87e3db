//! The interaction state machine.
//!
//! One machine per widget, wired at construction for the widget's
//! interaction mode. [`GestureMachine::on_event`] maps a gesture event
//! plus the widget's open flag to the actions the widget should apply:
//!
//! - momentary: press opens, drag selects, release confirms;
//! - toggle: press opens, a later press confirms what it lands on, and
//!   quick taps outside dismiss;
//! - double-tap variants require two quick presses to open, after which
//!   the mode's normal flow applies.

use std::time::{Duration, Instant};

use crate::gesture::double_tap::DoubleTapDetector;
use crate::gesture::{GestureEvent, Pointer};
use crate::layout::HitTarget;

/// What a widget should do in response to a gesture event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureAction {
    /// Open the widget.
    Open,
    /// Move the selection to whatever the pointer resolves to.
    Select {
        /// The pointer to resolve.
        pointer: Pointer,
        /// True when the pointer comes from a drag move; touch input is
        /// re-resolved by point in that case.
        during_drag: bool,
    },
    /// Confirm the current selection and close.
    Submit,
    /// Close without confirming.
    Dismiss,
}

/// Per-widget gesture state machine.
///
/// The interaction mode is fixed when the machine is built; property
/// writes that change mode flags only take effect on the next widget
/// built from them.
#[derive(Debug, Clone)]
pub struct GestureMachine {
    toggle: bool,
    double_tap: Option<DoubleTapDetector>,
}

impl GestureMachine {
    /// Machine for the given interaction mode flags.
    pub fn new(toggle: bool, double_tap: bool) -> Self {
        Self {
            toggle,
            double_tap: double_tap.then(DoubleTapDetector::new),
        }
    }

    /// Machine with an explicit double-tap window.
    pub fn with_tap_window(toggle: bool, window: Duration) -> Self {
        Self {
            toggle,
            double_tap: Some(DoubleTapDetector::with_window(window)),
        }
    }

    /// True in toggle mode.
    pub const fn is_toggle(&self) -> bool {
        self.toggle
    }

    /// True when opening requires a double tap.
    pub const fn requires_double_tap(&self) -> bool {
        self.double_tap.is_some()
    }

    /// True when the widget should hear document-wide fast taps.
    /// Only toggle-mode widgets dismiss on outside taps.
    pub const fn wants_global_taps(&self) -> bool {
        self.toggle
    }

    /// Advance the machine by one event.
    ///
    /// `opened` is the widget's open flag at dispatch time and `now`
    /// feeds the double-tap detector. Actions are returned in
    /// application order.
    pub fn on_event(
        &mut self,
        event: &GestureEvent,
        opened: bool,
        now: Instant,
    ) -> Vec<GestureAction> {
        let mut actions = Vec::new();
        match event {
            GestureEvent::DragInit(pointer) => {
                // an open toggle menu treats the press as confirmation of
                // whatever it lands on
                if opened && self.toggle {
                    actions.push(GestureAction::Select {
                        pointer: *pointer,
                        during_drag: false,
                    });
                    actions.push(GestureAction::Submit);
                }
                match &mut self.double_tap {
                    Some(detector) => {
                        if detector.feed(now) && !opened {
                            actions.push(GestureAction::Open);
                        }
                    }
                    None => {
                        if !opened {
                            actions.push(GestureAction::Open);
                        }
                    }
                }
            }
            GestureEvent::DragMove(pointer) => {
                if opened && !self.toggle {
                    actions.push(GestureAction::Select {
                        pointer: *pointer,
                        during_drag: true,
                    });
                }
            }
            GestureEvent::DragEnd(_) => {
                if opened && !self.toggle {
                    actions.push(GestureAction::Submit);
                }
            }
            GestureEvent::FastTap(pointer) => {
                if self.toggle && opened && pointer.target == HitTarget::Outside {
                    actions.push(GestureAction::Dismiss);
                }
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(target: HitTarget) -> GestureEvent {
        GestureEvent::DragInit(Pointer::new(target))
    }

    fn drag(target: HitTarget) -> GestureEvent {
        GestureEvent::DragMove(Pointer::new(target))
    }

    fn release(target: HitTarget) -> GestureEvent {
        GestureEvent::DragEnd(Pointer::new(target))
    }

    fn tap(target: HitTarget) -> GestureEvent {
        GestureEvent::FastTap(Pointer::new(target))
    }

    #[test]
    fn test_momentary_press_opens_only_when_closed() {
        let mut m = GestureMachine::new(false, false);
        let now = Instant::now();
        assert_eq!(
            m.on_event(&press(HitTarget::Segment(0)), false, now),
            vec![GestureAction::Open]
        );
        assert_eq!(m.on_event(&press(HitTarget::Segment(0)), true, now), vec![]);
    }

    #[test]
    fn test_momentary_drag_selects_while_open() {
        let mut m = GestureMachine::new(false, false);
        let now = Instant::now();
        let actions = m.on_event(&drag(HitTarget::Segment(2)), true, now);
        assert_eq!(
            actions,
            vec![GestureAction::Select {
                pointer: Pointer::new(HitTarget::Segment(2)),
                during_drag: true,
            }]
        );
        assert_eq!(m.on_event(&drag(HitTarget::Segment(2)), false, now), vec![]);
    }

    #[test]
    fn test_momentary_release_submits_while_open() {
        let mut m = GestureMachine::new(false, false);
        let now = Instant::now();
        assert_eq!(
            m.on_event(&release(HitTarget::Segment(1)), true, now),
            vec![GestureAction::Submit]
        );
        assert_eq!(
            m.on_event(&release(HitTarget::Segment(1)), false, now),
            vec![]
        );
    }

    #[test]
    fn test_toggle_press_confirms_when_open() {
        let mut m = GestureMachine::new(true, false);
        let now = Instant::now();
        assert_eq!(
            m.on_event(&press(HitTarget::Segment(0)), false, now),
            vec![GestureAction::Open]
        );
        let actions = m.on_event(&press(HitTarget::Segment(1)), true, now);
        assert_eq!(
            actions,
            vec![
                GestureAction::Select {
                    pointer: Pointer::new(HitTarget::Segment(1)),
                    during_drag: false,
                },
                GestureAction::Submit,
            ]
        );
    }

    #[test]
    fn test_toggle_ignores_moves_and_releases() {
        let mut m = GestureMachine::new(true, false);
        let now = Instant::now();
        assert_eq!(m.on_event(&drag(HitTarget::Segment(1)), true, now), vec![]);
        assert_eq!(
            m.on_event(&release(HitTarget::Segment(1)), true, now),
            vec![]
        );
    }

    #[test]
    fn test_toggle_fast_tap_outside_dismisses() {
        let mut m = GestureMachine::new(true, false);
        let now = Instant::now();
        assert_eq!(
            m.on_event(&tap(HitTarget::Outside), true, now),
            vec![GestureAction::Dismiss]
        );
        // taps that land anywhere on the widget leave it open
        assert_eq!(m.on_event(&tap(HitTarget::Surface), true, now), vec![]);
        assert_eq!(m.on_event(&tap(HitTarget::Hub), true, now), vec![]);
        assert_eq!(m.on_event(&tap(HitTarget::Segment(0)), true, now), vec![]);
        // nothing to dismiss when closed
        assert_eq!(m.on_event(&tap(HitTarget::Outside), false, now), vec![]);
    }

    #[test]
    fn test_momentary_ignores_fast_taps() {
        let mut m = GestureMachine::new(false, false);
        let now = Instant::now();
        assert!(!m.wants_global_taps());
        assert_eq!(m.on_event(&tap(HitTarget::Outside), true, now), vec![]);
    }

    #[test]
    fn test_double_tap_needs_two_quick_presses() {
        let mut m = GestureMachine::with_tap_window(false, Duration::from_millis(300));
        let t0 = Instant::now();
        assert_eq!(m.on_event(&press(HitTarget::Segment(0)), false, t0), vec![]);
        assert_eq!(
            m.on_event(
                &press(HitTarget::Segment(0)),
                false,
                t0 + Duration::from_millis(100)
            ),
            vec![GestureAction::Open]
        );
    }

    #[test]
    fn test_double_tap_slow_second_press_stays_closed() {
        let mut m = GestureMachine::with_tap_window(false, Duration::from_millis(300));
        let t0 = Instant::now();
        m.on_event(&press(HitTarget::Segment(0)), false, t0);
        assert_eq!(
            m.on_event(
                &press(HitTarget::Segment(0)),
                false,
                t0 + Duration::from_millis(400)
            ),
            vec![]
        );
    }

    #[test]
    fn test_double_tap_momentary_flow_after_open() {
        let mut m = GestureMachine::with_tap_window(false, Duration::from_millis(300));
        let t0 = Instant::now();
        m.on_event(&press(HitTarget::Segment(0)), false, t0);
        m.on_event(
            &press(HitTarget::Segment(0)),
            false,
            t0 + Duration::from_millis(100),
        );
        let actions = m.on_event(
            &drag(HitTarget::Segment(1)),
            true,
            t0 + Duration::from_millis(200),
        );
        assert_eq!(
            actions,
            vec![GestureAction::Select {
                pointer: Pointer::new(HitTarget::Segment(1)),
                during_drag: true,
            }]
        );
        assert_eq!(
            m.on_event(
                &release(HitTarget::Segment(1)),
                true,
                t0 + Duration::from_millis(300)
            ),
            vec![GestureAction::Submit]
        );
    }

    #[test]
    fn test_double_tap_toggle_press_still_confirms_when_open() {
        let mut m = GestureMachine::with_tap_window(true, Duration::from_millis(300));
        let now = Instant::now();
        let actions = m.on_event(&press(HitTarget::Segment(0)), true, now);
        assert_eq!(
            actions,
            vec![
                GestureAction::Select {
                    pointer: Pointer::new(HitTarget::Segment(0)),
                    during_drag: false,
                },
                GestureAction::Submit,
            ]
        );
    }

    #[test]
    fn test_mode_flags_are_visible() {
        assert!(GestureMachine::new(true, false).is_toggle());
        assert!(GestureMachine::new(true, false).wants_global_taps());
        assert!(!GestureMachine::new(false, true).wants_global_taps());
        assert!(GestureMachine::new(false, true).requires_double_tap());
    }
}
