use super::*;

fn stage_with_cards() -> (Stage, Vec<ElementHandle>) {
    let mut stage = Stage::new();
    let handles = (1..=3)
        .map(|i| {
            stage.insert(
                ElementSpec::new(format!("card-{i}"))
                    .class("card")
                    .geometry(100.0 * i as f64, 50.0),
            )
        })
        .collect();
    (stage, handles)
}

#[test]
fn resolve_returns_matches_in_slot_order() {
    let (stage, handles) = stage_with_cards();
    let sel = Selector::parse(".card").unwrap();
    assert_eq!(stage.resolve(&sel), handles);
    let sel = Selector::parse("#card-2").unwrap();
    assert_eq!(stage.resolve(&sel), vec![handles[1]]);
    assert_eq!(stage.find_by_id("card-3"), Some(handles[2]));
}

#[test]
fn stale_handles_miss_after_removal_and_reuse() {
    let (mut stage, handles) = stage_with_cards();
    assert!(stage.remove(handles[0]).is_some());
    assert!(!stage.contains(handles[0]));
    assert!(!stage.write(handles[0], Property::Opacity, 0.5));

    let reused = stage.insert(ElementSpec::new("late"));
    assert_ne!(reused, handles[0]);
    assert!(stage.get(handles[0]).is_none());
    assert_eq!(stage.get(reused).unwrap().spec.id, "late");
    assert_eq!(stage.len(), 3);
}

#[test]
fn reset_restores_element_rest_state() {
    let mut stage = Stage::new();
    let rest = VisualState {
        rotation_deg: -90.0,
        ..VisualState::REST
    };
    let h = stage.insert(ElementSpec::new("micro").rest(rest));
    assert_eq!(stage.state(h), Some(rest));

    assert!(stage.write(h, Property::Opacity, 0.25));
    assert!(stage.write(h, Property::Y, 10.0));
    assert_eq!(stage.state(h).unwrap().opacity, 0.25);

    assert!(stage.reset(h));
    assert_eq!(stage.state(h), Some(rest));
}

#[test]
fn set_geometry_updates_spec() {
    let (mut stage, handles) = stage_with_cards();
    assert!(stage.set_geometry(handles[1], 900.0, 10.0));
    let el = stage.get(handles[1]).unwrap();
    assert_eq!((el.spec.top, el.spec.height), (900.0, 10.0));
}
