use super::*;
use crate::scene::stage::ElementSpec;

fn cards(n: usize) -> (Stage, Selector) {
    let mut stage = Stage::new();
    for i in 0..n {
        stage.insert(ElementSpec::new(format!("c{i}")).class("card"));
    }
    (stage, Selector::parse(".card").unwrap())
}

#[test]
fn local_progress_clamps_outside_window() {
    let (stage, sel) = cards(1);
    let mut tw = Tween::new(sel).at(0.7).duration(0.3).opacity(1.0, 0.0);
    tw.resolve(&stage);
    assert_eq!(tw.local_progress(0.2, 0), 0.0);
    assert_eq!(tw.local_progress(0.7, 0), 0.0);
    assert!((tw.local_progress(0.85, 0) - 0.5).abs() < 1e-12);
    assert_eq!(tw.local_progress(1.0, 0), 1.0);
    assert_eq!(tw.local_progress(4.0, 0), 1.0);
}

#[test]
fn zero_duration_is_a_toggle_at_start() {
    let (stage, sel) = cards(1);
    let mut tw = Tween::new(sel).at(0.5).duration(0.0).opacity(0.0, 1.0);
    tw.resolve(&stage);
    assert_eq!(tw.local_progress(0.49, 0), 0.0);
    assert_eq!(tw.local_progress(0.5, 0), 1.0);
    assert_eq!(tw.local_progress(0.9, 0), 1.0);
}

#[test]
fn stagger_offsets_each_resolved_element() {
    let (stage, sel) = cards(3);
    let mut tw = Tween::new(sel).at(0.7).duration(0.2).stagger(0.02);
    tw.resolve(&stage);
    assert_eq!(tw.handles().len(), 3);
    assert!((tw.start_for(2) - 0.74).abs() < 1e-12);
    assert!((tw.end() - 0.94).abs() < 1e-12);
    assert_eq!(tw.local_progress(0.72, 2), 0.0);
}

#[test]
fn prop_replaces_existing_track() {
    let h = Stage::new().insert(ElementSpec::new("a"));
    let tw = Tween::new(h).opacity(0.0, 1.0).opacity(1.0, 0.0);
    assert_eq!(tw.tracks.len(), 1);
    assert_eq!(tw.tracks[0].from, Some(Length::Px(1.0)));
    assert_eq!(tw.handles(), &[h]);
}

#[test]
fn validate_rejects_non_finite_and_misplaced_units() {
    let h = Stage::new().insert(ElementSpec::new("a"));
    assert!(Tween::new(h).at(f64::NAN).validate().is_err());
    assert!(Tween::new(h).duration(f64::INFINITY).validate().is_err());
    assert!(Tween::new(h).duration(-0.1).validate().is_err());
    assert!(
        Tween::new(h)
            .prop(Property::Opacity, Length::Vw(1.0), 0.0)
            .validate()
            .is_err()
    );
    assert!(
        Tween::new(h)
            .track(PropertyTrack {
                property: Property::Scale,
                from: None,
                to: None,
            })
            .validate()
            .is_err()
    );
    assert!(
        Tween::new(h)
            .x(Length::Vw(-55.0), 0.0)
            .at(0.7)
            .duration(1.3)
            .validate()
            .is_ok()
    );
}
