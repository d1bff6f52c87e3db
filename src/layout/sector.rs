//! Circular sector geometry.
//!
//! Sectors are drawn with the rotate/skew technique: each segment is a
//! quarter box rotated to its start angle and skewed down to its span,
//! with counter-transforms on the inner box and label so the label reads
//! upright. Angles are degrees, clockwise from the top of the circle.

/// The transform chain for one circular segment.
///
/// All fields are degrees. The outer element applies `rotate` then
/// `skew`; the inner element undoes the skew and centers its content in
/// the sector; the label undoes the cumulative rotation so it stays
/// upright.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorTransform {
    /// Outer rotation to the segment's start angle.
    pub rotate: f64,
    /// Outer skew collapsing a quarter box down to the segment's span.
    pub skew: f64,
    /// Inner skew undoing the outer one.
    pub inner_skew: f64,
    /// Inner rotation centering content within the span.
    pub inner_rotate: f64,
    /// Label counter-rotation keeping the text upright.
    pub label_rotate: f64,
}

impl SectorTransform {
    /// Transforms for a segment starting at `start_angle` and spanning
    /// `angle_span` degrees.
    pub fn for_span(start_angle: f64, angle_span: f64) -> Self {
        let skew = 90.0 - angle_span;
        Self {
            rotate: start_angle,
            skew,
            inner_skew: -skew,
            inner_rotate: -90.0 + angle_span / 2.0,
            label_rotate: -start_angle + 90.0 - angle_span / 2.0,
        }
    }
}

/// Angle of the vector `(dx, dy)` in degrees, clockwise from the top,
/// normalized to `[0, 360)`. `dy` grows downward, matching surface
/// coordinates.
pub fn polar_angle(dx: f64, dy: f64) -> f64 {
    let mut theta = dx.atan2(-dy).to_degrees();
    if theta < 0.0 {
        theta += 360.0;
    }
    theta
}

/// True when `angle` falls inside `[start, start + span)`.
///
/// Placement never wraps past 360 (capped spans accumulate to at most a
/// full turn), so a plain interval test suffices.
pub fn angle_within(start: f64, span: f64, angle: f64) -> bool {
    angle >= start && angle < start + span
}
