use super::*;
use crate::{
    animation::{ease::Ease, tween::Tween},
    foundation::core::{Length, VisualState},
    scene::selector::Selector,
    scene::stage::{ElementHandle, ElementSpec},
};

fn vp() -> Viewport {
    Viewport::new(1000.0, 800.0).unwrap()
}

fn hero() -> (Stage, ElementHandle, EntryAnimator) {
    let mut stage = Stage::new();
    let photo = stage.insert(ElementSpec::new("hero-photo"));
    stage.insert(ElementSpec::new("line-1").class("hero-line"));
    stage.insert(ElementSpec::new("line-2").class("hero-line"));
    let tl = Timeline::new()
        .with(
            Tween::new(photo)
                .duration(0.9)
                .ease(Ease::OutQuart)
                .x(Length::Vw(-12.0), 0.0)
                .scale(0.98, 1.0)
                .opacity(0.0, 1.0),
        )
        .unwrap()
        .with(
            Tween::new(Selector::parse(".hero-line").unwrap())
                .at(0.15)
                .duration(0.7)
                .stagger(0.08)
                .ease(Ease::OutQuart)
                .x(Length::Vw(6.0), 0.0)
                .opacity(0.0, 1.0),
        )
        .unwrap();
    (stage, photo, EntryAnimator::new(tl))
}

#[test]
fn play_writes_first_frame_and_runs_once() {
    let (mut stage, photo, mut entry) = hero();
    assert_eq!(entry.state(), EntryState::Idle);
    assert!(entry.play(vp(), &mut stage));
    assert_eq!(entry.state(), EntryState::Playing);
    let s = stage.state(photo).unwrap();
    assert_eq!(s.opacity, 0.0);
    assert_eq!(s.offset.x, -120.0);
    assert!(!entry.play(vp(), &mut stage));
}

#[test]
fn duration_includes_stagger_once_resolved() {
    let (mut stage, _, mut entry) = hero();
    assert!((entry.duration() - 0.9).abs() < 1e-12);
    entry.play(vp(), &mut stage);
    assert!((entry.duration() - 0.93).abs() < 1e-12);
}

#[test]
fn completes_at_end_state_and_releases_timeline() {
    let (mut stage, photo, mut entry) = hero();
    entry.play(vp(), &mut stage);
    let mut frames = 0;
    while entry.tick(1.0 / 60.0, vp(), &mut stage) {
        frames += 1;
        assert!(frames < 120);
    }
    assert_eq!(entry.state(), EntryState::Finished);
    assert_eq!(entry.duration(), 0.0);
    assert_eq!(stage.state(photo).unwrap(), VisualState::REST);
    let line = stage.find_by_id("line-2").unwrap();
    assert_eq!(stage.state(line).unwrap(), VisualState::REST);
    assert!(!entry.tick(1.0, vp(), &mut stage));
}

#[test]
fn interrupted_playback_forces_rest() {
    let (mut stage, photo, mut entry) = hero();
    entry.play(vp(), &mut stage);
    entry.tick(0.3, vp(), &mut stage);
    assert!(stage.state(photo).unwrap().opacity < 1.0);
    entry.teardown(&mut stage);
    assert_eq!(entry.state(), EntryState::Finished);
    assert_eq!(stage.state(photo).unwrap(), VisualState::REST);
    assert!(!entry.play(vp(), &mut stage));
}

#[test]
fn apply_rewrites_current_frame() {
    let (mut stage, photo, mut entry) = hero();
    entry.play(vp(), &mut stage);
    entry.tick(0.2, vp(), &mut stage);
    let expected = stage.state(photo).unwrap();
    stage.reset(photo);
    entry.apply(vp(), &mut stage);
    assert_eq!(stage.state(photo).unwrap(), expected);
}
