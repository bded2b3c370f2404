//! End-to-end gesture scenarios driven through the public session API.

use inkmark_core::{
    ClassifierConfig, DrawingSession, EngineConfig, TouchOutcome, TouchSample, ToolKind,
};
use kurbo::{Point, Rect};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn canvas() -> DrawingSession {
    init_logging();
    DrawingSession::new(Rect::new(0.0, 0.0, 1024.0, 768.0), EngineConfig::default())
}

fn pen(t: u64) -> TouchSample {
    TouchSample::at(t).with_force(1.0)
}

#[test]
fn straight_stroke_commits_smoothed_points() {
    let mut session = canvas();

    assert_eq!(session.on_touch_start(Point::new(0.0, 0.0), &pen(0)), TouchOutcome::Started);
    assert_eq!(session.on_touch_move(Point::new(10.0, 0.0), &pen(50)), TouchOutcome::Extended);
    let outcome = session.on_touch_end(Point::new(20.0, 0.0), &TouchSample::at(100));
    assert!(matches!(outcome, TouchOutcome::Committed(_)));

    let stroke = session.strokes().iter().next().expect("stroke committed");
    assert!(stroke.len() >= 3);
    assert_eq!(stroke.first().position, Point::new(0.0, 0.0));
    assert_eq!(stroke.last().position, Point::new(20.0, 0.0));

    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history().index(), 1);
}

#[test]
fn erase_drag_removes_exactly_one_stroke() {
    let mut session = canvas();

    for (i, y) in [100.0, 400.0].into_iter().enumerate() {
        let t = i as u64 * 1000;
        session.on_touch_start(Point::new(200.0, y), &pen(t));
        session.on_touch_move(Point::new(210.0, y), &pen(t + 30));
        session.on_touch_end(Point::new(220.0, y), &pen(t + 60));
    }
    assert_eq!(session.strokes().len(), 2);
    let history_before = session.history().len();

    assert!(session.set_tool(ToolKind::Erase));
    session.on_touch_start(Point::new(195.0, 100.0), &pen(5000));
    session.on_touch_move(Point::new(210.0, 100.0), &pen(5030));
    session.on_touch_move(Point::new(225.0, 100.0), &pen(5060));
    assert_eq!(session.on_touch_end(Point::new(225.0, 100.0), &pen(5090)), TouchOutcome::Ended);

    assert_eq!(session.strokes().len(), 1);
    assert!(session.history().len() > history_before);
    assert!(session.strokes().iter().all(|s| s.first().y() > 300.0));
}

#[test]
fn drag_erase_is_undoable_step_by_step() {
    let mut session = canvas();
    session.on_touch_start(Point::new(100.0, 100.0), &pen(0));
    for (i, x) in (110..=300).step_by(10).enumerate() {
        session.on_touch_move(Point::new(x as f64, 100.0), &pen(20 * (i as u64 + 1)));
    }
    session.on_touch_end(Point::new(300.0, 100.0), &pen(1000));
    let full = session.strokes().point_count();

    session.set_tool(ToolKind::Erase);
    session.on_touch_start(Point::new(100.0, 100.0), &pen(2000));
    session.on_touch_move(Point::new(200.0, 100.0), &pen(2050));
    session.on_touch_end(Point::new(200.0, 100.0), &pen(2100));
    let after_two_passes = session.strokes().point_count();
    assert!(after_two_passes < full);

    assert!(session.undo());
    let after_one_pass = session.strokes().point_count();
    assert!(after_one_pass > after_two_passes);
    assert!(after_one_pass < full);

    assert!(session.undo());
    assert_eq!(session.strokes().point_count(), full);
}

#[test]
fn finger_touches_do_not_draw_with_strict_classifier() {
    init_logging();
    let config = EngineConfig {
        classifier: ClassifierConfig::strict(),
        ..EngineConfig::default()
    };
    let mut session = DrawingSession::new(Rect::new(0.0, 0.0, 500.0, 500.0), config);

    // Quick tap with a wide contact: rejected.
    let tap = TouchSample::at(1000).with_radii(10.0, 8.0).with_contact_started(990);
    assert_eq!(session.on_touch_start(Point::new(50.0, 50.0), &tap), TouchOutcome::Ignored);
    assert_eq!(session.on_touch_move(Point::new(80.0, 50.0), &tap), TouchOutcome::Ignored);
    assert_eq!(session.on_touch_end(Point::new(80.0, 50.0), &tap), TouchOutcome::Ignored);

    // Long press well after the tap: accepted.
    let held = TouchSample::at(2000).with_contact_started(1600);
    assert_eq!(session.on_touch_start(Point::new(50.0, 50.0), &held), TouchOutcome::Started);

    assert!(session.strokes().is_empty());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn highlight_strokes_render_wider() {
    let mut session = canvas();
    session.set_tool(ToolKind::Highlight);
    session.on_touch_start(Point::new(10.0, 10.0), &pen(0));
    session.on_touch_move(Point::new(40.0, 10.0), &pen(30));
    session.on_touch_end(Point::new(70.0, 10.0), &pen(60));

    let stroke = session.strokes().iter().next().expect("stroke committed");
    assert_eq!(stroke.tool(), ToolKind::Highlight);

    let palette = session.palette();
    let point = stroke.points()[1];
    assert!(
        palette.width_of(ToolKind::Highlight, point.pressure, point.velocity)
            > palette.width_of(ToolKind::Black, point.pressure, point.velocity)
    );
}

#[test]
fn history_limit_bounds_long_sessions() {
    init_logging();
    let config = EngineConfig {
        history_limit: 5,
        ..EngineConfig::default()
    };
    let mut session = DrawingSession::new(Rect::new(0.0, 0.0, 500.0, 500.0), config);

    for i in 0..10u64 {
        let y = 10.0 + i as f64 * 20.0;
        session.on_touch_start(Point::new(10.0, y), &pen(i * 1000));
        session.on_touch_end(Point::new(60.0, y), &pen(i * 1000 + 50));
    }

    assert_eq!(session.strokes().len(), 10);
    assert_eq!(session.history().len(), 5);

    let mut undone = 0;
    while session.undo() {
        undone += 1;
    }
    assert_eq!(undone, 4);
    assert_eq!(session.strokes().len(), 6);
}
