//! State round trip: snapshot a control surface and restore it.
//!
//! Demonstrates:
//! - Building a ControlSurface with several menus
//! - Programmatic value writes and gesture-confirmed values
//! - Snapshot text and line-tolerant restore
//! - The control event stream

use std::time::Instant;

use serde_json::json;

use rosette::{
    restore, snapshot, ControlEvent, ControlSurface, Menu, MenuLayout, MenuProps, PointerPhase,
    SyncFlags, ValueSpec, Widget, WidgetId,
};

fn main() {
    env_logger::init();

    println!("Rosette state round trip");
    println!("========================");
    println!();

    let mut surface = ControlSurface::new();
    let (speeds, modes) = build_menus(&mut surface);

    // Pick one value by direct write and one through the toggle gesture:
    // first press opens the menu, second press confirms the segment under
    // the pointer.
    if let Some(widget) = surface.widget_mut(speeds) {
        widget.set_value(json!(2), SyncFlags::SYNC);
    }
    let now = Instant::now();
    surface.pointer(modes, PointerPhase::Press, 10.0, 10.0, false, now);
    surface.pointer(modes, PointerPhase::Release, 10.0, 10.0, false, now);
    surface.pointer(modes, PointerPhase::Press, 50.0, 150.0, false, now);
    surface.pointer(modes, PointerPhase::Release, 50.0, 150.0, false, now);
    drain(&surface, "after the writes");

    let text = snapshot(&surface);
    println!("snapshot:");
    for line in text.lines() {
        println!("  {line}");
    }
    println!();

    // A fresh surface with the same widgets picks the values back up.
    let mut rebuilt = ControlSurface::new();
    build_menus(&mut rebuilt);
    let stats = restore(&mut rebuilt, &text, SyncFlags::SYNC);
    println!("restore: {} applied, {} skipped", stats.applied, stats.skipped);
    for (id, widget) in rebuilt.iter() {
        let value = widget
            .current_value()
            .map_or_else(|| "(unset)".to_string(), ToString::to_string);
        println!("  widget {} value: {value}", id.0);
    }
    println!();
    drain(&rebuilt, "after the restore");

    // Damaged snapshots are skipped line by line, never fatal.
    let stats = restore(&mut rebuilt, "0 2\nnot a line\n9 1\n", SyncFlags::empty());
    println!(
        "tolerant restore: {} applied, {} skipped",
        stats.applied, stats.skipped
    );
}

fn build_menus(surface: &mut ControlSurface) -> (WidgetId, WidgetId) {
    let speeds = surface.add(|id, outbox| {
        Box::new(Menu::new(
            id,
            MenuProps {
                values: ValueSpec::coerce(&json!([0.5, 1, 2, 4])),
                ..Default::default()
            },
            outbox,
        ))
    });
    let modes = surface.add(|id, outbox| {
        Box::new(Menu::new(
            id,
            MenuProps {
                layout: MenuLayout::Vertical,
                toggle: true,
                values: ValueSpec::coerce(&json!({
                    "slow attack": [20, 500],
                    "fast attack": [2, 120],
                })),
                ..Default::default()
            },
            outbox,
        ))
    });
    (speeds, modes)
}

fn drain(surface: &ControlSurface, label: &str) {
    println!("events {label}:");
    while let Ok(event) = surface.events().try_recv() {
        match event {
            ControlEvent::ValueSent { id, value } => println!("  widget {} sent {value}", id.0),
            ControlEvent::ValueChanged { id, value, sent } => {
                println!("  widget {} changed to {value} (sent: {sent})", id.0);
            }
        }
    }
    println!();
}
