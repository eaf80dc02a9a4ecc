use std::cell::Cell;
use std::rc::Rc;

use qurve_charts::prelude::*;
use qurve_core::{Event, ManualFrames};
use qurve_paint::{PaintCommand, PaintContext, Point};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn pages() -> Vec<Record> {
    [("Page A", 400), ("Page B", 300), ("Page C", 200), ("Page D", 278), ("Page E", 189)]
        .into_iter()
        .map(|(name, uv)| record([("name", Value::from(name)), ("uv", Value::from(uv))]))
        .collect()
}

struct Fixture {
    frames: Rc<ManualFrames>,
    chart: Chart,
    _x: XAxis,
    _line: LineSeries,
    tooltip: Tooltip,
}

fn fixture() -> Fixture {
    init_tracing();
    let frames = ManualFrames::new();
    let chart = Chart::new(pages(), ChartProps::default(), frames.clone()).unwrap();
    chart.set_surface_origin(10.0, 20.0);
    let x = XAxis::mount(&chart, XAxisProps::new().with_data_key("name")).unwrap();
    let line = LineSeries::mount(&chart, LineProps::new("uv").with_name("Visits")).unwrap();
    let tooltip = Tooltip::mount(&chart, TooltipProps::new()).unwrap();
    Fixture {
        frames,
        chart,
        _x: x,
        _line: line,
        tooltip,
    }
}

#[test]
fn hover_resolves_closest_record() {
    let f = fixture();
    // local x 310 sits closest to the third record at x 300
    f.chart.pointer_move(320.0, 70.0);
    assert_eq!(f.chart.hovered_index(), Some(2));

    let state = f.tooltip.state();
    assert!(state.active);
    assert_eq!(state.label, "Page C");
    assert_eq!(state.payload.len(), 1);
    assert_eq!(state.payload[0].label, "Visits");
    assert_eq!(state.payload[0].value, Some(200.0));

    let point = state.point.unwrap();
    assert_eq!(point.x, 300.0);
    assert_eq!(state.position.x, 312.0);
    assert!(state.position.y >= 0.0);
}

#[test]
fn hover_draws_crosshair_and_active_dots() {
    let f = fixture();
    f.chart.flush(&mut PaintContext::new());
    f.chart.pointer_move(160.0, 100.0);
    assert!(f.chart.is_repaint_pending());

    let mut ctx = PaintContext::new();
    let stats = f.chart.flush(&mut ctx);
    assert_eq!(stats.failed, 0);
    let clips = ctx
        .commands()
        .iter()
        .filter(|c| matches!(c, PaintCommand::PushClip { .. }))
        .count();
    assert_eq!(clips, 1);
    // five data dots, the series' active dot and the tooltip's active dot
    let circles = ctx
        .commands()
        .iter()
        .filter(|c| matches!(c, PaintCommand::FillCircle { .. }))
        .count();
    assert_eq!(circles, 7);
}

#[test]
fn leave_hides_tooltip() {
    let f = fixture();
    f.chart.pointer_move(320.0, 70.0);
    f.chart.flush(&mut PaintContext::new());
    let requests = f.frames.requests();

    f.chart.handle_event(&Event::pointer_leave()).unwrap();
    assert_eq!(f.chart.hovered_index(), None);
    assert!(!f.tooltip.state().active);
    assert!(f.chart.current_tooltip_payload().is_empty());
    assert_eq!(f.frames.requests(), requests + 1);

    let mut ctx = PaintContext::new();
    f.chart.flush(&mut ctx);
    assert!(!ctx
        .commands()
        .iter()
        .any(|c| matches!(c, PaintCommand::PushClip { .. })));
}

#[test]
fn empty_dataset_keeps_tooltip_hidden() {
    let f = fixture();
    f.chart.pointer_move(320.0, 70.0);
    f.chart.set_data(Dataset::default());
    assert_eq!(f.chart.hovered_index(), None);
    assert!(!f.tooltip.state().active);

    f.chart.pointer_move(100.0, 70.0);
    assert_eq!(f.chart.hovered_index(), None);
    let stats = f.chart.flush(&mut PaintContext::new());
    assert_eq!(stats.failed, 0);
}

#[test]
fn null_values_are_filtered_unless_disabled() {
    let f = fixture();
    let _sparse = LineSeries::mount(&f.chart, LineProps::new("missing")).unwrap();
    f.chart.pointer_move(10.0, 70.0);
    assert_eq!(f.tooltip.state().payload.len(), 1);

    f.tooltip
        .update(TooltipProps::new().with_filter_null(false).with_item_sorter(ItemSorter::Name));
    f.chart.pointer_move(10.0, 70.0);
    let labels: Vec<_> = f
        .tooltip
        .state()
        .payload
        .into_iter()
        .map(|i| i.label)
        .collect();
    assert_eq!(labels, vec!["Visits", "missing"]);
}

#[test]
fn failing_subscriber_does_not_block_tooltip() {
    let f = fixture();
    let calls = Rc::new(Cell::new(0));
    let c = calls.clone();
    let _bad = f
        .chart
        .subscribe_pointer_move("bad", move |_, _| {
            c.set(c.get() + 1);
            anyhow::bail!("subscriber failed")
        })
        .unwrap();
    let failed = f.chart.pointer_move(610.0, 70.0);
    assert_eq!(failed, 1);
    assert_eq!(calls.get(), 1);
    assert_eq!(f.chart.hovered_index(), Some(4));
    assert_eq!(f.chart.pointer(), Some(Point::new(600.0, 50.0)));
}

#[test]
fn resize_event_moves_points() {
    let f = fixture();
    f.chart.handle_event(&Event::resize(300.0, 200.0)).unwrap();
    f.chart.pointer_move(160.0, 70.0);
    // points now sit every 75px; local x 150 is the third record
    assert_eq!(f.chart.hovered_index(), Some(2));
}
