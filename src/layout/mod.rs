//! Layout: layout kinds, sizing, and the built gesture surface.
//!
//! A menu renders in one of four layouts. `circular` arranges entries as
//! weighted sectors of a circle around a center hub; the box family
//! (`horizontal`, `vertical`, `grid`) arranges them as weighted flex
//! tracks or grid cells. [`MenuSurface`] is the built form: container
//! state plus per-segment geometry, and the hit testing gestures resolve
//! against.

mod flex;
mod sector;
mod surface;

pub use flex::FlexCell;
pub use sector::SectorTransform;
pub use surface::{ContainerState, HitTarget, MenuSegment, MenuSurface, HUB_RADIUS_RATIO};

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// The menu's geometric arrangement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuLayout {
    /// Weighted circular sectors around a center hub.
    #[default]
    Circular,
    /// Weighted flex tracks along the horizontal axis.
    Horizontal,
    /// Weighted flex tracks along the vertical axis.
    Vertical,
    /// Row-major grid with a configurable column count.
    Grid,
}

impl MenuLayout {
    /// Coerce a raw property payload into a layout kind.
    ///
    /// Only the known names select their layout; any other payload falls
    /// into the box family as `horizontal`. Absence of the property (the
    /// `circular` default) is handled by the property layer, not here.
    pub fn parse(raw: &Value) -> Self {
        match raw {
            Value::String(s) => match s.as_str() {
                "circular" => Self::Circular,
                "vertical" => Self::Vertical,
                "grid" => Self::Grid,
                _ => Self::Horizontal,
            },
            _ => Self::Horizontal,
        }
    }

    /// True for the circular layout.
    pub const fn is_circular(self) -> bool {
        matches!(self, Self::Circular)
    }

    /// True for any box-family layout.
    pub const fn is_boxed(self) -> bool {
        !self.is_circular()
    }

    /// The property-level name of this layout.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Circular => "circular",
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Grid => "grid",
        }
    }
}

/// The `size` property after coercion: one edge or a width/height pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeSpec {
    /// A single edge length, used as both width and height. The circular
    /// layout reads it as the diameter.
    Square(f64),
    /// Separate width and height for box layouts; the circular layout
    /// uses only the width.
    Pair(f64, f64),
}

impl SizeSpec {
    /// Edge length used when the property is absent or malformed.
    pub const DEFAULT_EDGE: f64 = 200.0;

    /// Coerce a raw property payload into a size.
    ///
    /// Numbers become a square, two-element numeric lists a pair.
    /// Negative edges clamp to zero; anything else falls back to the
    /// default edge.
    pub fn coerce(raw: &Value) -> Self {
        fn edge(v: Option<&Value>) -> f64 {
            v.and_then(Value::as_f64)
                .map_or(SizeSpec::DEFAULT_EDGE, |e| e.max(0.0))
        }
        match raw {
            Value::Number(n) => Self::Square(n.as_f64().map_or(Self::DEFAULT_EDGE, |e| e.max(0.0))),
            Value::Array(items) if items.len() == 1 => Self::Square(edge(items.first())),
            Value::Array(items) if items.len() >= 2 => {
                Self::Pair(edge(items.first()), edge(items.get(1)))
            }
            _ => Self::Square(Self::DEFAULT_EDGE),
        }
    }

    /// Width edge.
    pub const fn width(self) -> f64 {
        match self {
            Self::Square(e) | Self::Pair(e, _) => e,
        }
    }

    /// Height edge.
    pub const fn height(self) -> f64 {
        match self {
            Self::Square(e) | Self::Pair(_, e) => e,
        }
    }

    /// The primary edge: the diameter for circular layouts.
    pub const fn primary(self) -> f64 {
        self.width()
    }

    /// The property-level JSON form.
    pub fn to_value(self) -> Value {
        match self {
            Self::Square(e) => Value::from(e),
            Self::Pair(w, h) => Value::from(vec![w, h]),
        }
    }
}

impl Default for SizeSpec {
    fn default() -> Self {
        Self::Square(Self::DEFAULT_EDGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_layout_parse_known_names() {
        assert_eq!(MenuLayout::parse(&json!("circular")), MenuLayout::Circular);
        assert_eq!(MenuLayout::parse(&json!("vertical")), MenuLayout::Vertical);
        assert_eq!(MenuLayout::parse(&json!("grid")), MenuLayout::Grid);
        assert_eq!(
            MenuLayout::parse(&json!("horizontal")),
            MenuLayout::Horizontal
        );
    }

    #[test]
    fn test_layout_parse_unknown_falls_into_box_family() {
        assert_eq!(MenuLayout::parse(&json!("spiral")), MenuLayout::Horizontal);
        assert_eq!(MenuLayout::parse(&json!(3)), MenuLayout::Horizontal);
        assert_eq!(MenuLayout::parse(&Value::Null), MenuLayout::Horizontal);
    }

    #[test]
    fn test_size_coerce() {
        assert_eq!(SizeSpec::coerce(&json!(150)), SizeSpec::Square(150.0));
        assert_eq!(SizeSpec::coerce(&json!([80])), SizeSpec::Square(80.0));
        assert_eq!(
            SizeSpec::coerce(&json!([300, 100])),
            SizeSpec::Pair(300.0, 100.0)
        );
        assert_eq!(SizeSpec::coerce(&json!(-5)), SizeSpec::Square(0.0));
        assert_eq!(
            SizeSpec::coerce(&json!("big")),
            SizeSpec::Square(SizeSpec::DEFAULT_EDGE)
        );
    }

    #[test]
    fn test_size_edges() {
        let pair = SizeSpec::Pair(300.0, 100.0);
        assert_eq!(pair.width(), 300.0);
        assert_eq!(pair.height(), 100.0);
        assert_eq!(pair.primary(), 300.0);
        assert_eq!(SizeSpec::Square(80.0).height(), 80.0);
    }
}
