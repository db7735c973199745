use super::*;
use crate::{
    animation::tween::Tween,
    foundation::core::{Length, VisualState},
    scene::stage::{ElementHandle, ElementSpec},
    scroll::{region::RegionPhase, trigger::EndCondition},
};

struct Fixture {
    engine: AnimationEngine,
    headline: ElementHandle,
    photo: ElementHandle,
    region: RegionId,
}

fn layout() -> Layout {
    Layout::new(Viewport::new(1600.0, 1000.0).unwrap(), 6000.0).unwrap()
}

fn fixture(scrub: Option<f64>) -> Fixture {
    let mut engine = AnimationEngine::new(layout(), EngineConfig::default()).unwrap();
    let stage = engine.stage_mut();
    stage.insert(ElementSpec::new("hero").geometry(0.0, 1000.0));
    let section = stage.insert(ElementSpec::new("featured").geometry(1000.0, 1000.0));
    let headline = stage.insert(ElementSpec::new("headline").geometry(1200.0, 200.0));
    let photo = stage.insert(ElementSpec::new("photo").geometry(1000.0, 1000.0));

    let timeline = Timeline::new()
        .with(
            Tween::new(headline)
                .duration(0.5)
                .opacity(0.0, 1.0)
                .y(40.0, 0.0),
        )
        .unwrap()
        .with(
            Tween::new(photo)
                .at(0.7)
                .duration(0.3)
                .x(0.0, Length::Vw(-55.0)),
        )
        .unwrap();
    let region = engine.register_region(
        ScrollRegion::new(section, timeline)
            .label("featured")
            .end_when(EndCondition::ViewportPercent(130.0))
            .pinned(true)
            .scrub(scrub)
            .unwrap(),
    );
    engine.init();
    Fixture {
        engine,
        headline,
        photo,
        region,
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn init_resolves_spans_and_pin_spacing() {
    let f = fixture(None);
    let r = f.engine.registry().get(f.region).unwrap();
    assert_eq!((r.start(), r.end()), (1000.0, 2300.0));
    assert_eq!(f.engine.total_scrollable(), 6300.0);
    assert!(f.engine.is_initialized());
}

#[test]
fn scroll_drives_progress_and_pinning() {
    let mut f = fixture(None);
    f.engine.on_scroll(1325.0);
    let s = f.engine.stage().state(f.headline).unwrap();
    assert!(close(s.opacity, 0.5));
    assert!(close(s.offset.y, 20.0));

    f.engine.on_scroll(1650.0);
    let frame = f.engine.frame();
    let region = frame.region("featured").unwrap();
    assert_eq!(region.phase, RegionPhase::Active);
    assert_eq!(region.progress, 0.5);
    assert_eq!(region.pin_translation, 650.0);

    f.engine.on_scroll(2500.0);
    let frame = f.engine.frame();
    let region = frame.region("featured").unwrap();
    assert_eq!(region.phase, RegionPhase::After);
    assert_eq!(region.progress, 1.0);
    assert_eq!(region.pin_translation, 1300.0);
    assert!(close(frame.element("photo").unwrap().state.offset.x, -880.0));
}

#[test]
fn same_offset_gives_same_frame() {
    let mut f = fixture(None);
    f.engine.on_scroll(1800.0);
    let a = f.engine.frame();
    f.engine.on_scroll(1800.0);
    assert_eq!(a, f.engine.frame());
}

#[test]
fn leave_back_restores_rest() {
    let mut f = fixture(None);
    f.engine.on_scroll(2500.0);
    assert_ne!(f.engine.stage().state(f.photo).unwrap(), VisualState::REST);
    f.engine.on_scroll(500.0);
    assert_eq!(f.engine.stage().state(f.photo).unwrap(), VisualState::REST);
    assert_eq!(f.engine.stage().state(f.headline).unwrap(), VisualState::REST);
}

#[test]
fn unregister_mid_animation_forces_rest() {
    let mut f = fixture(None);
    f.engine.on_scroll(2150.0);
    assert!(f.engine.stage().state(f.photo).unwrap().offset.x < 0.0);
    assert!(f.engine.unregister_region(f.region));
    assert_eq!(f.engine.stage().state(f.photo).unwrap(), VisualState::REST);
    assert_eq!(f.engine.stage().state(f.headline).unwrap(), VisualState::REST);
    assert_eq!(f.engine.total_scrollable(), 5000.0);
    assert!(!f.engine.unregister_region(f.region));
}

#[test]
fn settled_scroll_snaps_to_region_center() {
    let mut f = fixture(None);
    f.engine.on_scroll(2400.0);
    // Still moving fast.
    assert!(f.engine.tick(1.0 / 60.0).is_none());
    assert!(f.engine.snap_in_flight().is_none());
    // No scroll since the last tick: settled.
    assert!(f.engine.tick(1.0 / 60.0).is_none());
    let task = f.engine.snap_in_flight().unwrap();
    assert!(close(task.target(), 1650.0));
    assert_eq!(task.region(), f.region);

    let mut last = 2400.0;
    let mut steps = 0;
    loop {
        let req = f.engine.tick(1.0 / 60.0).unwrap();
        assert!(req.offset <= last);
        last = req.offset;
        f.engine.on_scroll(req.offset);
        steps += 1;
        assert!(steps < 60);
        if req.finished {
            break;
        }
    }
    assert!(close(f.engine.scroll_offset(), 1650.0));
    assert!(f.engine.snap_in_flight().is_none());
    assert!(f.engine.tick(1.0 / 60.0).is_none());
}

#[test]
fn user_scroll_cancels_snap() {
    let mut f = fixture(None);
    f.engine.on_scroll(2400.0);
    f.engine.tick(1.0 / 60.0);
    f.engine.tick(1.0 / 60.0);
    let req = f.engine.tick(1.0 / 60.0).unwrap();
    f.engine.on_scroll(req.offset);
    assert!(f.engine.snap_in_flight().is_some());

    f.engine.on_scroll(3200.0);
    assert!(f.engine.snap_in_flight().is_none());
    assert!(f.engine.tick(1.0 / 60.0).is_none());
}

#[test]
fn resize_recomputes_spans() {
    let mut f = fixture(None);
    let small = Layout::new(Viewport::new(800.0, 500.0).unwrap(), 6000.0).unwrap();
    f.engine.on_resize(small);
    let r = f.engine.registry().get(f.region).unwrap();
    assert_eq!((r.start(), r.end()), (1000.0, 1650.0));
    assert_eq!(f.engine.total_scrollable(), 6150.0);
}

#[test]
fn scrub_lags_behind_scroll() {
    let mut f = fixture(Some(0.5));
    f.engine.on_scroll(1650.0);
    let region = f.engine.registry().get(f.region).unwrap();
    assert_eq!(region.progress(), 0.0);

    f.engine.tick(0.1);
    let p = f.engine.registry().get(f.region).unwrap().progress();
    assert!(p > 0.0 && p < 0.5, "{p}");

    f.engine.settle();
    let p = f.engine.registry().get(f.region).unwrap().progress();
    assert_eq!(p, 0.5);
}

#[test]
fn entry_plays_on_init_and_finishes() {
    let mut engine = AnimationEngine::new(layout(), EngineConfig::default()).unwrap();
    let title = engine
        .stage_mut()
        .insert(ElementSpec::new("title").geometry(100.0, 200.0));
    engine.set_entry(
        Timeline::new()
            .with(Tween::new(title).duration(0.6).opacity(0.0, 1.0))
            .unwrap(),
    );
    engine.init();
    assert_eq!(engine.stage().state(title).unwrap().opacity, 0.0);
    for _ in 0..20 {
        engine.tick(0.05);
    }
    assert_eq!(engine.stage().state(title).unwrap(), VisualState::REST);
}

#[test]
fn dispose_leaves_everything_at_rest() {
    let mut f = fixture(None);
    f.engine.on_scroll(2150.0);
    f.engine.dispose();
    assert!(f.engine.registry().is_empty());
    assert!(!f.engine.is_initialized());
    for (_, el) in f.engine.stage().iter() {
        assert_eq!(el.state, VisualState::REST);
    }
}

#[test]
fn snap_target_without_regions_is_identity() {
    let engine = AnimationEngine::new(layout(), EngineConfig::default()).unwrap();
    assert_eq!(engine.compute_snap_target(4200.0), 4200.0);
}
