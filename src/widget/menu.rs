//! The menu widget: a multi-value selector opened by gesture.
//!
//! A menu holds an ordered list of entries built from its `values` and
//! `weights` properties, arranged by a [`MenuSurface`]. Gestures drive a
//! per-widget [`GestureMachine`]; the widget applies the machine's
//! actions to its selection state and emits value events through its
//! [`Outbox`] when a selection is confirmed.
//!
//! Rendering state is a pure projection: a segment is `active` when the
//! menu is open and the selection rests on it, and `on` when it holds
//! the widget's current value. Neither flag is stored per segment.

use std::time::Instant;

use crate::gesture::{GestureAction, GestureEvent, GestureMachine, Pointer};
use crate::layout::{HitTarget, MenuSegment, MenuSurface};
use crate::props::{MenuProps, PropKey};
use crate::surface::Outbox;
use crate::value::{display_string, fit_label, EntryList, Value};
use crate::widget::{SyncFlags, Widget, WidgetId};

/// One segment with its projected rendering flags.
#[derive(Debug, Clone, Copy)]
pub struct SegmentView<'a> {
    /// The segment's label and geometry.
    pub segment: &'a MenuSegment,
    /// Selection rests here and the menu is open.
    pub active: bool,
    /// This segment holds the widget's current value.
    pub on: bool,
}

/// A multi-value selector widget.
pub struct Menu {
    id: WidgetId,
    props: MenuProps,
    machine: GestureMachine,
    entries: EntryList,
    surface: MenuSurface,
    opened: bool,
    /// Selection the next submit confirms. Survives close so the
    /// confirming press can read it.
    selected: Option<usize>,
    /// Entry holding the current value, if the value resolved.
    marked: Option<usize>,
    current: Option<Value>,
    outbox: Outbox,
    dirty: bool,
}

impl Menu {
    /// Build a menu from its coerced properties.
    ///
    /// The interaction mode flags are read here, once; later property
    /// writes to them are stored but do not rewire a live menu.
    pub fn new(id: WidgetId, props: MenuProps, outbox: Outbox) -> Self {
        let machine = GestureMachine::new(props.toggle, props.double_tap);
        let entries = EntryList::build(&props.values, &props.weights);
        let surface = MenuSurface::build(&entries, props.layout, props.columns, props.size);
        Self {
            id,
            props,
            machine,
            entries,
            surface,
            opened: false,
            selected: None,
            marked: None,
            current: None,
            outbox,
            dirty: true,
        }
    }

    /// True while the menu is open.
    pub const fn is_open(&self) -> bool {
        self.opened
    }

    /// The current selection, if any.
    pub const fn selection(&self) -> Option<usize> {
        self.selected
    }

    /// The selection as an index, `-1` when there is none.
    pub fn selected_index(&self) -> i32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        self.selected.map_or(-1, |i| i as i32)
    }

    /// The coerced properties.
    pub const fn props(&self) -> &MenuProps {
        &self.props
    }

    /// The normalized entry list.
    pub const fn entries(&self) -> &EntryList {
        &self.entries
    }

    /// The built layout surface.
    pub const fn surface(&self) -> &MenuSurface {
        &self.surface
    }

    /// Open the menu. No-op while already open.
    pub fn open(&mut self) {
        if self.opened {
            return;
        }
        self.opened = true;
        self.dirty = true;
    }

    /// Close the menu without confirming. No-op while already closed.
    ///
    /// The selection is kept; only its `active` projection disappears
    /// with the open flag.
    pub fn close(&mut self) {
        if !self.opened {
            return;
        }
        self.opened = false;
        self.dirty = true;
    }

    /// Segments with their projected `active`/`on` flags, in order.
    pub fn segment_views(&self) -> impl Iterator<Item = SegmentView<'_>> {
        self.surface
            .segments()
            .iter()
            .enumerate()
            .map(move |(index, segment)| SegmentView {
                segment,
                active: self.opened && self.selected == Some(index),
                on: self.marked == Some(index),
            })
    }

    /// The display node's text: the current value's display string, or
    /// empty before any value is set.
    pub fn display_text(&self) -> String {
        self.current.as_ref().map(display_string).unwrap_or_default()
    }

    /// [`Self::display_text`] fitted into a column budget.
    pub fn display_text_fitted(&self, max_width: usize) -> String {
        fit_label(&self.display_text(), max_width)
    }

    /// Coerce, store, and apply one property write.
    ///
    /// Each dynamic key maps to the re-layout step it invalidates: sizing
    /// keys rebuild the surface, content keys rebuild entries and surface
    /// both. Mode flags are stored without touching the live machine.
    pub fn set_prop(&mut self, key: PropKey, raw: &Value) {
        self.props.set(key, raw);
        match key {
            PropKey::Size | PropKey::Columns => self.rebuild_surface(),
            PropKey::Layout | PropKey::Values | PropKey::Weights => self.rebuild(),
            PropKey::Toggle | PropKey::DoubleTap => {}
        }
    }

    /// Read one property back in document form.
    pub fn get_prop(&self, key: PropKey) -> Value {
        self.props.get(key)
    }

    /// Rebuild entries and surface from the stored properties, then
    /// re-resolve the current value against the new entries.
    ///
    /// The open flag survives: an open menu stays open on its replaced
    /// surface.
    pub fn rebuild(&mut self) {
        self.entries = EntryList::build(&self.props.values, &self.props.weights);
        // indices from the previous entry set must not outlive it
        if self.selected.is_some_and(|i| i >= self.entries.len()) {
            self.selected = None;
        }
        if self.marked.is_some_and(|i| i >= self.entries.len()) {
            self.marked = None;
        }
        self.rebuild_surface();
        match self.current.clone() {
            Some(value) => self.set_value(value, SyncFlags::empty()),
            None => {
                self.marked = None;
                self.dirty = true;
            }
        }
    }

    fn rebuild_surface(&mut self) {
        self.surface = MenuSurface::build(
            &self.entries,
            self.props.layout,
            self.props.columns,
            self.props.size,
        );
        self.dirty = true;
    }

    /// Write the widget's value.
    ///
    /// The candidate is matched against the entries. On a hit the
    /// matching entry becomes current, selected, and marked; on a miss
    /// the value and selection stay put but every `on` marker clears.
    /// [`SyncFlags::SEND`] emits the (possibly unchanged) current value
    /// to remote targets, [`SyncFlags::SYNC`] notifies local listeners.
    pub fn set_value(&mut self, candidate: Value, flags: SyncFlags) {
        let found = self.entries.position_of(&candidate);
        if let Some(index) = found {
            if let Some(entry) = self.entries.get(index) {
                self.current = Some(entry.value.clone());
            }
            self.selected = Some(index);
        }
        self.marked = found;
        self.dirty = true;
        if let Some(value) = &self.current {
            if flags.contains(SyncFlags::SEND) {
                self.outbox.send_value(value);
            }
            if flags.contains(SyncFlags::SYNC) {
                self.outbox.changed(value, flags.contains(SyncFlags::SEND));
            }
        }
    }

    /// Move the selection to whatever `pointer` resolves to.
    ///
    /// Touch input is re-resolved by point during drag moves; everything
    /// else uses the pointer's direct target. Only segment hits select;
    /// the hub, bare surface, and outside all clear the selection.
    fn select_from(&mut self, pointer: &Pointer, during_drag: bool) {
        let target = match pointer.point {
            Some((x, y)) if during_drag && pointer.touch => self.surface.hit(x, y),
            _ => pointer.target,
        };
        let next = match target {
            HitTarget::Segment(index) if index < self.entries.len() => Some(index),
            _ => None,
        };
        if next != self.selected {
            self.selected = next;
            self.dirty = true;
        }
    }

    /// Close, then confirm the selection if one exists.
    fn submit(&mut self) {
        self.close();
        if let Some(index) = self.selected {
            if let Some(entry) = self.entries.get(index) {
                let value = entry.value.clone();
                log::debug!("menu {} submits {}", self.id.0, value);
                self.set_value(value, SyncFlags::SEND | SyncFlags::SYNC);
            }
        }
    }
}

impl Widget for Menu {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn resolve(&self, x: f64, y: f64) -> HitTarget {
        self.surface.hit(x, y)
    }

    fn handle_gesture(&mut self, event: &GestureEvent, now: Instant) -> bool {
        let actions = self.machine.on_event(event, self.opened, now);
        if actions.is_empty() {
            return false;
        }
        for action in actions {
            match action {
                GestureAction::Open => self.open(),
                GestureAction::Select {
                    pointer,
                    during_drag,
                } => self.select_from(&pointer, during_drag),
                GestureAction::Submit => self.submit(),
                GestureAction::Dismiss => self.close(),
            }
        }
        true
    }

    fn current_value(&self) -> Option<&Value> {
        self.current.as_ref()
    }

    fn set_value(&mut self, value: Value, flags: SyncFlags) {
        Menu::set_value(self, value, flags);
    }

    fn wants_global_taps(&self) -> bool {
        self.machine.wants_global_taps()
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}
