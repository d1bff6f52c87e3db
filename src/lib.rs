//! # Rosette
//!
//! A multi-value selector widget ("menu") for touch control surfaces.
//!
//! Rosette models the complete interactive life of a menu widget without
//! prescribing a renderer: properties in, gestures in, selection state
//! and value events out. Hosts draw whatever they like from the widget's
//! projected state.
//!
//! ## Core Concepts
//!
//! - **Validated properties**: a closed key set with lenient coercion;
//!   each dynamic key maps to exactly the re-layout step it invalidates
//! - **Weighted layouts**: circular sectors with capped spans, or
//!   weighted flex tracks and grids, hit-testable without a document tree
//! - **Gesture machine**: momentary, toggle, and double-tap interaction
//!   wired at construction and driven by explicit timestamps
//! - **Value synchronization**: structural entry matching, `active`/`on`
//!   markers as pure projections, send/sync fan-out over channels
//!
//! ## Example
//!
//! ```rust,ignore
//! use rosette::{ControlSurface, Menu, MenuProps, PointerPhase};
//!
//! let mut surface = ControlSurface::new();
//! let id = surface.add(|id, outbox| {
//!     Box::new(Menu::new(id, MenuProps::default(), outbox))
//! });
//!
//! // press opens, dragging selects, release confirms
//! let now = std::time::Instant::now();
//! surface.pointer(id, PointerPhase::Press, 100.0, 40.0, false, now);
//! surface.pointer(id, PointerPhase::Move, 150.0, 150.0, false, now);
//! surface.pointer(id, PointerPhase::Release, 150.0, 150.0, false, now);
//!
//! for event in surface.events().try_iter() {
//!     println!("{event:?}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod value;
pub mod layout;
pub mod gesture;
pub mod props;
pub mod widget;
pub mod surface;

// Re-exports for convenience
pub use value::{EntryList, MenuEntry, Value, ValueSpec, WeightSpec, MAX_ANGLE_SPAN};
pub use layout::{
    ContainerState, HitTarget, MenuLayout, MenuSegment, MenuSurface, SectorTransform, SizeSpec,
};
pub use gesture::{
    DoubleTapDetector, GestureAction, GestureEvent, GestureMachine, Pointer, DOUBLE_TAP_WINDOW,
};
pub use props::{MenuProps, PropError, PropKey};
pub use widget::{Menu, SegmentView, SyncFlags, Widget, WidgetId};
pub use surface::{
    restore, snapshot, AdapterOutput, ControlEvent, ControlSurface, Outbox, PointerAdapter,
    PointerPhase, RestoreStats, ScreenRegion, StateError,
};
