//! Surface demo: drive two menus with the terminal mouse.
//!
//! Demonstrates:
//! - A momentary circular wheel: press opens, drag selects, release submits
//! - A toggle strip: tap opens, tap a cell confirms, tap anywhere else dismisses
//! - PointerAdapter mapping terminal cells onto surface units
//! - The control event stream and the redraw protocol
//!
//! Run with `RUST_LOG=debug` to watch gesture handling in the log.

use std::io::{self, Write as _};
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue, style::Print};
use serde_json::json;

use rosette::{
    AdapterOutput, ControlEvent, GestureEvent, HitTarget, Menu, MenuLayout, MenuProps, Outbox,
    Pointer, PointerAdapter, PointerPhase, ScreenRegion, SizeSpec, ValueSpec, Widget, WidgetId,
};

const WHEEL_REGION: ScreenRegion = ScreenRegion::new(2, 3, 24, 12);
const STRIP_REGION: ScreenRegion = ScreenRegion::new(36, 3, 28, 3);

fn main() -> io::Result<()> {
    env_logger::init();

    let (events_tx, events_rx) = unbounded();

    // Momentary circular wheel: hold the button, drag to a sector, release.
    let wheel_id = WidgetId::new(0);
    let mut wheel = Menu::new(
        wheel_id,
        MenuProps {
            size: SizeSpec::Square(240.0),
            values: ValueSpec::coerce(&json!(["red", "green", "blue", "amber"])),
            ..Default::default()
        },
        Outbox::new(wheel_id, events_tx.clone()),
    );

    // Toggle strip: tap to open, tap a cell to confirm, tap away to dismiss.
    let strip_id = WidgetId::new(1);
    let mut strip = Menu::new(
        strip_id,
        MenuProps {
            size: SizeSpec::Pair(280.0, 30.0),
            layout: MenuLayout::Horizontal,
            toggle: true,
            values: ValueSpec::coerce(&json!([0.25, 0.5, 1, 2])),
            ..Default::default()
        },
        Outbox::new(strip_id, events_tx),
    );

    let mut wheel_adapter = PointerAdapter::new(WHEEL_REGION, (240.0, 240.0));
    let mut strip_adapter = PointerAdapter::new(STRIP_REGION, (280.0, 30.0));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;

    let result = run(
        &mut stdout,
        &mut wheel,
        &mut strip,
        &mut wheel_adapter,
        &mut strip_adapter,
        &events_rx,
    );

    execute!(stdout, cursor::Show, DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn run(
    stdout: &mut io::Stdout,
    wheel: &mut Menu,
    strip: &mut Menu,
    wheel_adapter: &mut PointerAdapter,
    strip_adapter: &mut PointerAdapter,
    events_rx: &Receiver<ControlEvent>,
) -> io::Result<()> {
    let mut last_event = String::from("(no events yet)");
    draw(stdout, wheel, strip, &last_event)?;
    wheel.clear_redraw();
    strip.clear_redraw();

    loop {
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let event = event::read()?;
        if let Event::Key(key) = &event {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                _ => {}
            }
        }

        let now = Instant::now();
        let wheel_out = wheel_adapter.handle(&event, now);
        let strip_out = strip_adapter.handle(&event, now);

        feed(wheel, &wheel_out, now);
        feed(strip, &strip_out, now);

        // Fast taps are global; only toggle-mode menus subscribe. The
        // strip's adapter gives the tap in strip-local units, so taps on
        // the strip resolve to segments while taps anywhere else land
        // outside and dismiss it.
        if strip.wants_global_taps() {
            if let Some((x, y)) = tap_point(&strip_out) {
                let pointer = Pointer::at(strip.surface().hit(x, y), x, y);
                strip.handle_gesture(&GestureEvent::FastTap(pointer), now);
            }
        }

        let mut event_seen = false;
        while let Ok(control) = events_rx.try_recv() {
            last_event = describe(&control);
            event_seen = true;
        }

        if wheel.needs_redraw() || strip.needs_redraw() || event_seen {
            draw(stdout, wheel, strip, &last_event)?;
            wheel.clear_redraw();
            strip.clear_redraw();
        }
    }

    Ok(())
}

/// Relay an adapter's pointer outputs to a menu as gesture events.
fn feed(menu: &mut Menu, outputs: &[AdapterOutput], now: Instant) {
    for output in outputs {
        if let AdapterOutput::Pointer { phase, x, y } = *output {
            let pointer = Pointer::at(menu.surface().hit(x, y), x, y);
            let event = match phase {
                PointerPhase::Press => GestureEvent::DragInit(pointer),
                PointerPhase::Move => GestureEvent::DragMove(pointer),
                PointerPhase::Release => GestureEvent::DragEnd(pointer),
            };
            menu.handle_gesture(&event, now);
        }
    }
}

/// The fast tap in an adapter's output batch, if any.
fn tap_point(outputs: &[AdapterOutput]) -> Option<(f64, f64)> {
    outputs.iter().find_map(|output| match output {
        AdapterOutput::FastTap { x, y } => Some((*x, *y)),
        _ => None,
    })
}

fn describe(event: &ControlEvent) -> String {
    match event {
        ControlEvent::ValueSent { id, value } => format!("widget {} sent {value}", id.0),
        ControlEvent::ValueChanged { id, value, sent } => {
            format!("widget {} changed to {value} (sent: {sent})", id.0)
        }
    }
}

fn draw(stdout: &mut io::Stdout, wheel: &Menu, strip: &Menu, last_event: &str) -> io::Result<()> {
    queue!(
        stdout,
        Clear(ClearType::All),
        cursor::MoveTo(2, 0),
        Print("Rosette surface demo. Hold the wheel, tap the strip; q quits."),
    )?;

    draw_header(stdout, WHEEL_REGION, "wheel (hold)", wheel)?;
    draw_hit_map(stdout, WHEEL_REGION, wheel)?;
    draw_header(stdout, STRIP_REGION, "strip (tap)", strip)?;
    draw_hit_map(stdout, STRIP_REGION, strip)?;

    queue!(
        stdout,
        cursor::MoveTo(2, 18),
        Print(format!("last event: {last_event}")),
        cursor::MoveTo(2, 19),
        Print("map key: letters = segments, # = selected, * = current, + = hub"),
    )?;
    stdout.flush()
}

fn draw_header(
    stdout: &mut io::Stdout,
    region: ScreenRegion,
    title: &str,
    menu: &Menu,
) -> io::Result<()> {
    let state = if menu.is_open() { "open" } else { "closed" };
    queue!(
        stdout,
        cursor::MoveTo(region.x, region.y - 1),
        Print(format!(
            "{title} [{state}] value: {}",
            menu.display_text_fitted(8)
        )),
    )?;
    Ok(())
}

/// Render a menu region by hit-testing every cell center, so the drawn
/// geometry is exactly what the pointer will resolve against.
fn draw_hit_map(stdout: &mut io::Stdout, region: ScreenRegion, menu: &Menu) -> io::Result<()> {
    let (width, height) = menu.surface().extent();
    let sx = width / f64::from(region.width.max(1));
    let sy = height / f64::from(region.height.max(1));

    for row in 0..region.height {
        let mut line = String::with_capacity(usize::from(region.width));
        for column in 0..region.width {
            let x = (f64::from(column) + 0.5) * sx;
            let y = (f64::from(row) + 0.5) * sy;
            line.push(match menu.surface().hit(x, y) {
                HitTarget::Segment(index) => segment_char(menu, index),
                HitTarget::Hub => '+',
                HitTarget::Surface => '.',
                HitTarget::Outside => ' ',
            });
        }
        queue!(stdout, cursor::MoveTo(region.x, region.y + row), Print(line))?;
    }
    Ok(())
}

fn segment_char(menu: &Menu, index: usize) -> char {
    match menu.segment_views().nth(index) {
        Some(view) if view.active => '#',
        Some(view) if view.on => '*',
        #[allow(clippy::cast_possible_truncation)]
        _ => char::from(b'a' + (index % 26) as u8),
    }
}
