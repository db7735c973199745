use super::*;
use crate::foundation::core::VisualState;
use crate::scroll::region::RegionPhase;

const DOC: &str = r##"{
  "viewport": { "width": 1600, "height": 1000 },
  "document_height": 5000,
  "elements": [
    { "id": "hero", "top": 0, "height": 1000 },
    { "id": "hero-photo", "classes": ["photo"], "top": 0, "height": 1000 },
    { "id": "featured", "top": 1000, "height": 1000 },
    { "id": "featured-photo", "classes": ["photo"], "top": 1000, "height": 1000 },
    { "id": "card-1", "classes": ["card"], "top": 2000, "height": 300 },
    { "id": "card-2", "classes": ["card"], "top": 2000, "height": 300 }
  ],
  "entry": {
    "tweens": [
      { "target": "#hero-photo", "from": { "x": "-12vw", "opacity": 0 }, "duration": 0.9, "ease": "power3.out" }
    ]
  },
  "regions": [
    {
      "label": "featured",
      "trigger": "#featured",
      "end": "+=130%",
      "pin": true,
      "scrub": 0.6,
      "tweens": [
        { "target": "#featured-photo", "to": { "x": "-55vw" }, "at": 0.7, "duration": 0.3, "ease": "power2.in" }
      ]
    },
    {
      "label": "cards",
      "trigger": ".card",
      "start": "top 85%",
      "end": "top 60%",
      "tweens": [
        { "target": ".card", "from": { "y": 40, "opacity": 0 }, "duration": 0.5, "stagger": 0.1 }
      ]
    },
    { "label": "ghost", "trigger": "#missing" }
  ],
  "snap": { "tolerance": 0.03 }
}"##;

#[test]
fn parses_defaults_and_overrides() {
    let c = Choreography::from_json_str(DOC).unwrap();
    c.validate().unwrap();
    let cfg = c.config();
    assert_eq!(cfg.snap.tolerance, 0.03);
    assert_eq!(cfg.snap.max_duration, 0.35);
    assert!(cfg.pin_spacing);
    assert_eq!(c.viewport().width, 1600.0);
}

#[test]
fn build_registers_resolvable_regions() {
    let c = Choreography::from_json_str(DOC).unwrap();
    let mut engine = c.build().unwrap();
    engine.init();

    let spans = engine.registry().spans();
    let labels: Vec<&str> = spans.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["featured", "cards"]);
    assert_eq!((spans[0].start, spans[0].end), (1000.0, 2300.0));
    // 2000 + 1300 spacer - 850.
    assert_eq!((spans[1].start, spans[1].end), (2450.0, 2700.0));
    assert_eq!(engine.total_scrollable(), 5300.0);
}

#[test]
fn built_engine_animates_from_document() {
    let c = Choreography::from_json_str(DOC).unwrap();
    let mut engine = c.build().unwrap();
    engine.init();

    let frame = engine.frame();
    let hero = frame.element("hero-photo").unwrap();
    assert_eq!(hero.state.opacity, 0.0);
    assert_eq!(hero.state.offset.x, -192.0);

    engine.on_scroll(2500.0);
    engine.settle();
    let frame = engine.frame();
    assert_eq!(frame.region("featured").unwrap().phase, RegionPhase::After);
    assert_eq!(frame.element("featured-photo").unwrap().state.offset.x, -880.0);
    let first = frame.element("card-1").unwrap().state.opacity;
    let second = frame.element("card-2").unwrap().state.opacity;
    assert!((first - 0.4).abs() < 1e-9, "{first}");
    assert!((second - 0.2).abs() < 1e-9, "{second}");

    engine.on_scroll(0.0);
    let frame = engine.frame();
    assert_eq!(
        frame.element("featured-photo").unwrap().state,
        VisualState::REST
    );
}

#[test]
fn rejects_invalid_documents() {
    assert!(matches!(
        Choreography::from_json_str("{").unwrap_err(),
        ScrollreelError::Serde(_)
    ));

    let dup = r##"{ "viewport": { "width": 100, "height": 100 }, "document_height": 100,
        "elements": [ { "id": "a" }, { "id": "a" } ] }"##;
    let err = Choreography::from_json_str(dup).unwrap().validate().unwrap_err();
    assert!(err.to_string().contains("duplicate element id"));

    let units = r##"{ "viewport": { "width": 100, "height": 100 }, "document_height": 100,
        "regions": [ { "trigger": "#a", "tweens": [ { "target": "#a", "to": { "opacity": "5vw" } } ] } ] }"##;
    assert!(Choreography::from_json_str(units).unwrap().build().is_err());

    let bad_end = r##"{ "viewport": { "width": 100, "height": 100 }, "document_height": 100,
        "regions": [ { "trigger": "#a", "end": "sometime" } ] }"##;
    assert!(Choreography::from_json_str(bad_end).is_err());

    let empty = r##"{ "viewport": { "width": 100, "height": 100 }, "document_height": 100,
        "regions": [ { "trigger": "#a", "tweens": [ { "target": "#a" } ] } ] }"##;
    assert!(Choreography::from_json_str(empty).unwrap().validate().is_err());
}

#[test]
fn one_sided_tweens_resolve_against_element_rest() {
    let doc = r##"{ "viewport": { "width": 100, "height": 100 }, "document_height": 1000,
        "elements": [ { "id": "dial", "top": 0, "height": 100, "rest": { "rotation_deg": -90 } } ],
        "regions": [ { "trigger": "#dial", "end": "+=100%",
            "tweens": [ { "target": "#dial", "from": { "rotation": 0 } } ] } ] }"##;
    let mut engine = Choreography::from_json_str(doc).unwrap().build().unwrap();
    engine.init();

    engine.on_scroll(50.0);
    let dial = engine.frame().element("dial").unwrap().state;
    assert_eq!(dial.rotation_deg, -45.0);

    engine.on_scroll(100.0);
    let dial = engine.frame().element("dial").unwrap().state;
    assert_eq!(dial.rotation_deg, -90.0);
}

#[test]
fn document_round_trips_through_json() {
    let c = Choreography::from_json_str(DOC).unwrap();
    let again = Choreography::from_json_str(&c.to_json_string().unwrap()).unwrap();
    assert_eq!(again.config(), c.config());
}
