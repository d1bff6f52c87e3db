//! Menu pipeline benchmark: entry building, surface construction, hit
//! testing, and the full gesture round trip.
//!
//! Target: < 10µs for a 12-entry circular surface build

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rosette::{
    EntryList, GestureEvent, HitTarget, Menu, MenuLayout, MenuProps, MenuSurface, Outbox, Pointer,
    SizeSpec, ValueSpec, WeightSpec, Widget, WidgetId,
};
use serde_json::Value;
use std::time::Instant;

/// Numeric values `0..count` as a coerced value spec.
fn number_values(count: usize) -> ValueSpec {
    let list: Vec<Value> = (0..count as i64).map(Value::from).collect();
    ValueSpec::coerce(&Value::Array(list))
}

/// Weights `1..=count` as a coerced weight spec.
fn ramp_weights(count: usize) -> WeightSpec {
    let list: Vec<f64> = (1..=count).map(|w| w as f64).collect();
    WeightSpec::coerce(&Value::from(list))
}

fn entry_build(c: &mut Criterion) {
    let values = number_values(12);
    let weights = ramp_weights(12);

    c.bench_function("entry_build_12", |b| {
        b.iter(|| EntryList::build(black_box(&values), black_box(&weights)))
    });
}

fn surface_build_circular(c: &mut Criterion) {
    let entries = EntryList::build(&number_values(12), &WeightSpec::none());

    c.bench_function("surface_build_circular_12", |b| {
        b.iter(|| {
            MenuSurface::build(
                black_box(&entries),
                MenuLayout::Circular,
                None,
                SizeSpec::Square(200.0),
            )
        })
    });
}

fn circular_hit(c: &mut Criterion) {
    let entries = EntryList::build(&number_values(12), &WeightSpec::none());
    let surface =
        MenuSurface::build(&entries, MenuLayout::Circular, None, SizeSpec::Square(200.0));

    c.bench_function("circular_hit_12", |b| {
        b.iter(|| surface.hit(black_box(150.0), black_box(150.0)))
    });
}

fn value_scan_miss(c: &mut Criterion) {
    let entries = EntryList::build(&number_values(64), &WeightSpec::none());
    let miss = Value::from(-1);

    c.bench_function("value_scan_miss_64", |b| {
        b.iter(|| entries.position_of(black_box(&miss)))
    });
}

fn gesture_round_trip(c: &mut Criterion) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let id = WidgetId::new(0);
    let props = MenuProps {
        values: number_values(8),
        ..Default::default()
    };
    let mut menu = Menu::new(id, props, Outbox::new(id, tx));
    let now = Instant::now();

    c.bench_function("gesture_round_trip", |b| {
        b.iter(|| {
            menu.handle_gesture(
                &GestureEvent::DragInit(Pointer::new(HitTarget::Surface)),
                now,
            );
            menu.handle_gesture(
                &GestureEvent::DragMove(Pointer::new(HitTarget::Segment(3))),
                now,
            );
            menu.handle_gesture(
                &GestureEvent::DragEnd(Pointer::new(HitTarget::Surface)),
                now,
            );
            while rx.try_recv().is_ok() {}
        })
    });
}

fn surface_build_by_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface_build_by_count");

    for count in [4usize, 8, 16, 32, 64] {
        let entries = EntryList::build(&number_values(count), &WeightSpec::none());

        group.bench_with_input(BenchmarkId::new("circular", count), &entries, |b, entries| {
            b.iter(|| {
                MenuSurface::build(
                    black_box(entries),
                    MenuLayout::Circular,
                    None,
                    SizeSpec::Square(200.0),
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("grid", count), &entries, |b, entries| {
            b.iter(|| {
                MenuSurface::build(
                    black_box(entries),
                    MenuLayout::Grid,
                    None,
                    SizeSpec::Pair(300.0, 120.0),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    entry_build,
    surface_build_circular,
    circular_hit,
    value_scan_miss,
    gesture_round_trip,
    surface_build_by_count,
);
criterion_main!(benches);
