// Host-side tests for pointer normalisation.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod pointer {
    include!("../src/core/pointer.rs");
}

use pointer::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn top_left_maps_to_minus_one_plus_one() {
    let mut t = PointerTracker::new();
    t.update(0.0, 0.0, 1920.0, 1080.0);
    let s = t.current();
    assert!(approx(s.x, -1.0));
    assert!(approx(s.y, 1.0));
}

#[test]
fn centre_maps_to_origin() {
    let mut t = PointerTracker::new();
    t.update(960.0, 540.0, 1920.0, 1080.0);
    let s = t.current();
    assert!(approx(s.x, 0.0));
    assert!(approx(s.y, 0.0));
}

#[test]
fn bottom_right_maps_to_plus_one_minus_one() {
    let mut t = PointerTracker::new();
    t.update(1920.0, 1080.0, 1920.0, 1080.0);
    let s = t.current();
    assert!(approx(s.x, 1.0));
    assert!(approx(s.y, -1.0));
}

#[test]
fn y_axis_points_up() {
    let mut t = PointerTracker::new();
    t.update(960.0, 270.0, 1920.0, 1080.0);
    assert!(t.current().y > 0.0);
    t.update(960.0, 810.0, 1920.0, 1080.0);
    assert!(t.current().y < 0.0);
}

#[test]
fn outside_viewport_is_clamped() {
    let mut t = PointerTracker::new();
    t.update(-500.0, 5000.0, 1920.0, 1080.0);
    let s = t.current();
    assert_eq!(s.x, -1.0);
    assert_eq!(s.y, -1.0);
}

#[test]
fn degenerate_viewport_keeps_previous_sample() {
    let mut t = PointerTracker::new();
    t.update(480.0, 270.0, 1920.0, 1080.0);
    let before = t.current();
    t.update(10.0, 10.0, 0.0, 1080.0);
    t.update(10.0, 10.0, 1920.0, -1.0);
    t.update(f32::NAN, 10.0, 1920.0, 1080.0);
    assert_eq!(t.current(), before);
}

#[test]
fn initial_sample_is_centre() {
    let t = PointerTracker::new();
    assert_eq!(t.current(), PointerSample::default());
    assert_eq!(t.current().length(), 0.0);
}

#[test]
fn sample_constructor_sanitises_input() {
    let s = PointerSample::new(f32::INFINITY, -3.0);
    assert_eq!(s.x, 0.0);
    assert_eq!(s.y, -1.0);
}
