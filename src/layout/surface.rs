//! The built gesture surface: container state, segments, and hit testing.

use crate::layout::flex::{self, FlexCell};
use crate::layout::sector::{self, SectorTransform};
use crate::layout::{MenuLayout, SizeSpec};
use crate::value::EntryList;

/// Hub radius as a fraction of the circular layout's diameter.
pub const HUB_RADIUS_RATIO: f64 = 0.15;

/// What a surface-local point resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A segment, by entry index.
    Segment(usize),
    /// The circular layout's center hub. Never selectable.
    Hub,
    /// Inside the widget but on no segment: the unused arc of a capped
    /// circle, a trailing grid gap, or the corners around the circle.
    Surface,
    /// Outside the widget's box entirely.
    Outside,
}

/// Style-layer state of the menu container.
///
/// Mirrors the class and variable set the host style layer consumes:
/// one flag per layout family plus the sizing variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerState {
    /// Set for every box-family layout.
    pub boxed: bool,
    /// Set for the circular layout.
    pub circular: bool,
    /// Set for the grid layout.
    pub grid: bool,
    /// Set for the vertical layout.
    pub vertical: bool,
    /// Grid column count. Zero when the default `count / 2` collapses.
    pub grid_columns: u32,
    /// Primary size: the circle diameter, or the square edge.
    pub size: f64,
    /// Box width.
    pub box_width: f64,
    /// Box height.
    pub box_height: f64,
}

/// One rendered segment: label plus layout-specific geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSegment {
    /// Label text for this segment.
    pub label: String,
    /// Flex grow factor in box layouts.
    pub flex: f64,
    /// Sector transform chain; present only in the circular layout.
    pub sector: Option<SectorTransform>,
}

/// The built layout surface a menu's gestures resolve against.
///
/// Rebuilt whenever entries, layout, columns, or size change; hit testing
/// is read-only after that.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSurface {
    layout: MenuLayout,
    container: ContainerState,
    segments: Vec<MenuSegment>,
    /// Axis partition for `horizontal`/`vertical` hits.
    cells: Vec<FlexCell>,
    /// `(start, span)` arcs for circular hits.
    arcs: Vec<(f64, f64)>,
}

impl MenuSurface {
    /// Build the surface for the given entries and container properties.
    ///
    /// `columns` is the explicit grid column count; when absent, half the
    /// entry count (rounded down) is used.
    pub fn build(
        entries: &EntryList,
        layout: MenuLayout,
        columns: Option<u32>,
        size: SizeSpec,
    ) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let default_columns = (entries.len() / 2) as u32;
        let container = ContainerState {
            boxed: layout.is_boxed(),
            circular: layout.is_circular(),
            grid: layout == MenuLayout::Grid,
            vertical: layout == MenuLayout::Vertical,
            grid_columns: columns.unwrap_or(default_columns),
            size: size.primary(),
            box_width: size.width(),
            box_height: size.height(),
        };
        let segments = entries
            .iter()
            .map(|entry| MenuSegment {
                label: entry.label.clone(),
                flex: entry.weight,
                sector: layout
                    .is_circular()
                    .then(|| SectorTransform::for_span(entry.start_angle, entry.angle_span)),
            })
            .collect();
        let weights: Vec<f64> = entries.iter().map(|e| e.weight).collect();
        let arcs = entries
            .iter()
            .map(|e| (e.start_angle, e.angle_span))
            .collect();
        Self {
            layout,
            container,
            segments,
            cells: flex::weighted_cells(&weights),
            arcs,
        }
    }

    /// The layout this surface was built for.
    pub const fn layout(&self) -> MenuLayout {
        self.layout
    }

    /// Container style state.
    pub const fn container(&self) -> &ContainerState {
        &self.container
    }

    /// All segments in entry order.
    pub fn segments(&self) -> &[MenuSegment] {
        &self.segments
    }

    /// Segment at `index`, if any.
    pub fn segment(&self, index: usize) -> Option<&MenuSegment> {
        self.segments.get(index)
    }

    /// True when the surface carries a center hub (circular layout).
    pub const fn has_hub(&self) -> bool {
        self.layout.is_circular()
    }

    /// Widget box extent in surface units.
    pub const fn extent(&self) -> (f64, f64) {
        if self.layout.is_circular() {
            (self.container.size, self.container.size)
        } else {
            (self.container.box_width, self.container.box_height)
        }
    }

    /// Resolve a surface-local point to a target.
    ///
    /// Coordinates are in surface units with the origin at the widget's
    /// top-left corner and `y` growing downward.
    pub fn hit(&self, x: f64, y: f64) -> HitTarget {
        let (w, h) = self.extent();
        if x < 0.0 || y < 0.0 || x >= w || y >= h {
            return HitTarget::Outside;
        }
        match self.layout {
            MenuLayout::Circular => self.hit_circular(x, y, w),
            MenuLayout::Horizontal => match flex::cell_at(&self.cells, x / w) {
                Some(i) => HitTarget::Segment(i),
                None => HitTarget::Surface,
            },
            MenuLayout::Vertical => match flex::cell_at(&self.cells, y / h) {
                Some(i) => HitTarget::Segment(i),
                None => HitTarget::Surface,
            },
            MenuLayout::Grid => {
                #[allow(clippy::cast_possible_truncation)]
                let columns = self.container.grid_columns as usize;
                match flex::grid_cell(columns, self.segments.len(), x / w, y / h) {
                    Some(i) => HitTarget::Segment(i),
                    None => HitTarget::Surface,
                }
            }
        }
    }

    fn hit_circular(&self, x: f64, y: f64, diameter: f64) -> HitTarget {
        let radius = diameter / 2.0;
        let dx = x - radius;
        let dy = y - radius;
        let r = dx.hypot(dy);
        if r <= diameter * HUB_RADIUS_RATIO {
            return HitTarget::Hub;
        }
        if r > radius {
            // inside the square box but past the circle's edge
            return HitTarget::Surface;
        }
        let theta = sector::polar_angle(dx, dy);
        for (index, (start, span)) in self.arcs.iter().enumerate() {
            if sector::angle_within(*start, *span, theta) {
                return HitTarget::Segment(index);
            }
        }
        HitTarget::Surface
    }
}
