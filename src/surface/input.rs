//! Translating terminal mouse input into gesture events.
//!
//! One [`PointerAdapter`] serves one widget placement: it maps terminal
//! cells onto the widget's surface box, tracks the left-button drag
//! lifecycle, and synthesizes the quick press-and-release "fast taps"
//! that toggle-mode widgets dismiss on. The adapter stays geometry-blind;
//! target resolution happens on the surface when the outputs are fed to
//! [`crate::ControlSurface::pointer`] and
//! [`crate::ControlSurface::fast_tap`].

use std::time::{Duration, Instant};

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};

/// Longest press that still counts as a fast tap.
pub const FAST_TAP_DELAY: Duration = Duration::from_millis(200);

/// Cell slop allowed between press and release of a fast tap.
const FAST_TAP_SLOP: u16 = 1;

/// The screen rectangle a widget occupies, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRegion {
    /// Left column.
    pub x: u16,
    /// Top row.
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl ScreenRegion {
    /// A region at `(x, y)` spanning `width` by `height` cells.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the cell lies inside this region.
    pub const fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x + self.width
            && row >= self.y
            && row < self.y + self.height
    }
}

/// Phase of a pointer gesture relayed to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// The press began.
    Press,
    /// The pointer moved while pressed.
    Move,
    /// The press was released.
    Release,
}

/// One output of feeding a terminal event to the adapter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdapterOutput {
    /// A pointer phase at widget-local coordinates. Moves and releases
    /// may fall outside the widget's box; the surface resolves them to
    /// an outside target.
    Pointer {
        /// Gesture phase.
        phase: PointerPhase,
        /// Widget-local x in surface units.
        x: f64,
        /// Widget-local y in surface units.
        y: f64,
    },
    /// A quick press-and-release anywhere on the screen, in widget-local
    /// coordinates.
    FastTap {
        /// Widget-local x in surface units.
        x: f64,
        /// Widget-local y in surface units.
        y: f64,
    },
    /// The terminal was resized; the host should re-place its regions.
    Resize {
        /// New width in cells.
        width: u16,
        /// New height in cells.
        height: u16,
    },
}

/// Maps terminal mouse events onto one widget's gesture stream.
#[derive(Debug)]
pub struct PointerAdapter {
    region: ScreenRegion,
    surface_width: f64,
    surface_height: f64,
    dragging: bool,
    press: Option<(Instant, u16, u16)>,
}

impl PointerAdapter {
    /// Adapter for a widget occupying `region`, whose surface box is
    /// `surface_extent` units.
    pub const fn new(region: ScreenRegion, surface_extent: (f64, f64)) -> Self {
        Self {
            region,
            surface_width: surface_extent.0,
            surface_height: surface_extent.1,
            dragging: false,
            press: None,
        }
    }

    /// Move the widget to a new screen region.
    pub fn set_region(&mut self, region: ScreenRegion) {
        self.region = region;
    }

    /// Update the surface box, after a size property write.
    pub fn set_surface_extent(&mut self, extent: (f64, f64)) {
        self.surface_width = extent.0;
        self.surface_height = extent.1;
    }

    /// The current screen region.
    pub const fn region(&self) -> ScreenRegion {
        self.region
    }

    /// Map a terminal cell's center onto the widget's surface box.
    fn to_local(&self, column: u16, row: u16) -> (f64, f64) {
        let sx = self.surface_width / f64::from(self.region.width.max(1));
        let sy = self.surface_height / f64::from(self.region.height.max(1));
        let x = (f64::from(column) - f64::from(self.region.x) + 0.5) * sx;
        let y = (f64::from(row) - f64::from(self.region.y) + 0.5) * sy;
        (x, y)
    }

    /// Feed one terminal event, collecting gesture outputs.
    pub fn handle(&mut self, event: &Event, now: Instant) -> Vec<AdapterOutput> {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Resize(width, height) => vec![AdapterOutput::Resize {
                width: *width,
                height: *height,
            }],
            _ => Vec::new(),
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) -> Vec<AdapterOutput> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.press = Some((now, mouse.column, mouse.row));
                if self.region.contains(mouse.column, mouse.row) {
                    self.dragging = true;
                    let (x, y) = self.to_local(mouse.column, mouse.row);
                    vec![AdapterOutput::Pointer {
                        phase: PointerPhase::Press,
                        x,
                        y,
                    }]
                } else {
                    Vec::new()
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.dragging {
                    let (x, y) = self.to_local(mouse.column, mouse.row);
                    vec![AdapterOutput::Pointer {
                        phase: PointerPhase::Move,
                        x,
                        y,
                    }]
                } else {
                    Vec::new()
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let mut outputs = Vec::new();
                let (x, y) = self.to_local(mouse.column, mouse.row);
                if self.dragging {
                    self.dragging = false;
                    outputs.push(AdapterOutput::Pointer {
                        phase: PointerPhase::Release,
                        x,
                        y,
                    });
                }
                if let Some((pressed_at, column, row)) = self.press.take() {
                    let quick = now
                        .checked_duration_since(pressed_at)
                        .is_some_and(|d| d <= FAST_TAP_DELAY);
                    let steady = column.abs_diff(mouse.column) <= FAST_TAP_SLOP
                        && row.abs_diff(mouse.row) <= FAST_TAP_SLOP;
                    if quick && steady {
                        outputs.push(AdapterOutput::FastTap { x, y });
                    }
                }
                outputs
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        })
    }

    fn adapter() -> PointerAdapter {
        // 20x10 cells mapped onto a 200x200 surface
        PointerAdapter::new(ScreenRegion::new(10, 5, 20, 10), (200.0, 200.0))
    }

    #[test]
    fn test_press_inside_region_maps_to_local_units() {
        let mut a = adapter();
        let out = a.handle(
            &mouse(MouseEventKind::Down(MouseButton::Left), 10, 5),
            Instant::now(),
        );
        assert_eq!(
            out,
            vec![AdapterOutput::Pointer {
                phase: PointerPhase::Press,
                x: 5.0,
                y: 10.0,
            }]
        );
    }

    #[test]
    fn test_press_outside_region_is_not_a_gesture() {
        let mut a = adapter();
        let out = a.handle(
            &mouse(MouseEventKind::Down(MouseButton::Left), 0, 0),
            Instant::now(),
        );
        assert!(out.is_empty());
        // and moves without a press on the widget stay silent
        let out = a.handle(
            &mouse(MouseEventKind::Drag(MouseButton::Left), 12, 6),
            Instant::now(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_drag_follows_press_even_off_region() {
        let mut a = adapter();
        let t = Instant::now();
        a.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 15, 7), t);
        let out = a.handle(&mouse(MouseEventKind::Drag(MouseButton::Left), 40, 7), t);
        assert!(matches!(
            out.as_slice(),
            [AdapterOutput::Pointer {
                phase: PointerPhase::Move,
                ..
            }]
        ));
    }

    #[test]
    fn test_quick_release_synthesizes_fast_tap() {
        let mut a = adapter();
        let t0 = Instant::now();
        a.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 15, 7), t0);
        let out = a.handle(
            &mouse(MouseEventKind::Up(MouseButton::Left), 15, 7),
            t0 + Duration::from_millis(100),
        );
        assert_eq!(out.len(), 2);
        assert!(matches!(
            out[0],
            AdapterOutput::Pointer {
                phase: PointerPhase::Release,
                ..
            }
        ));
        assert!(matches!(out[1], AdapterOutput::FastTap { .. }));
    }

    #[test]
    fn test_slow_or_moved_release_is_no_tap() {
        let mut a = adapter();
        let t0 = Instant::now();
        a.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 15, 7), t0);
        let out = a.handle(
            &mouse(MouseEventKind::Up(MouseButton::Left), 15, 7),
            t0 + Duration::from_millis(400),
        );
        assert_eq!(out.len(), 1);

        a.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 15, 7), t0);
        let out = a.handle(
            &mouse(MouseEventKind::Up(MouseButton::Left), 19, 7),
            t0 + Duration::from_millis(50),
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_tap_off_the_widget_is_tap_only() {
        let mut a = adapter();
        let t0 = Instant::now();
        a.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 0, 0), t0);
        let out = a.handle(
            &mouse(MouseEventKind::Up(MouseButton::Left), 0, 0),
            t0 + Duration::from_millis(50),
        );
        assert!(matches!(out.as_slice(), [AdapterOutput::FastTap { .. }]));
    }

    #[test]
    fn test_other_buttons_and_motion_ignored() {
        let mut a = adapter();
        let t = Instant::now();
        assert!(a
            .handle(&mouse(MouseEventKind::Down(MouseButton::Right), 15, 7), t)
            .is_empty());
        assert!(a
            .handle(&mouse(MouseEventKind::Moved, 15, 7), t)
            .is_empty());
        assert!(a
            .handle(&mouse(MouseEventKind::ScrollUp, 15, 7), t)
            .is_empty());
    }

    #[test]
    fn test_resize_passthrough() {
        let mut a = adapter();
        let out = a.handle(&Event::Resize(120, 40), Instant::now());
        assert_eq!(
            out,
            vec![AdapterOutput::Resize {
                width: 120,
                height: 40,
            }]
        );
    }
}
