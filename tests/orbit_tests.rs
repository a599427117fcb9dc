// Host-side tests for orbit motion, picking and skill parsing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod pointer {
    include!("../src/core/pointer.rs");
}
mod shader {
    include!("../src/core/shader.rs");
}
mod animate {
    include!("../src/core/animate.rs");
}
mod camera {
    include!("../src/core/camera.rs");
}
mod orbit {
    include!("../src/core/orbit.rs");
}

use animate::*;
use glam::Vec3;
use orbit::*;
use std::cell::{Cell, RefCell};
use std::f32::consts::{PI, TAU};
use std::rc::Rc;

fn four_skills() -> Vec<OrbitItem> {
    ["A", "B", "C", "D"]
        .iter()
        .enumerate()
        .map(|(i, l)| OrbitItem::new(*l, [1.0, 1.0, 1.0], i, 4))
        .collect()
}

fn frame_at(elapsed: f32) -> FrameInput {
    FrameInput {
        elapsed,
        dt: 1.0 / 60.0,
        ..FrameInput::default()
    }
}

#[test]
fn phases_are_evenly_spaced() {
    let items = four_skills();
    for (i, it) in items.iter().enumerate() {
        assert!((it.angular_phase - i as f32 * TAU / 4.0).abs() < 1e-6);
    }
    assert_eq!(items[3].orbit_plane_tilt, 0.0);
    assert!((items[2].orbit_plane_tilt - 0.6).abs() < 1e-6);
}

#[test]
fn position_is_periodic() {
    let o = OrbitMotion::new(OrbitConfig::default(), four_skills());
    let period = TAU / constants::ORBIT_SPEED;
    for i in 0..4 {
        let a = o.position(i, 1.3).unwrap();
        let b = o.position(i, 1.3 + period).unwrap();
        assert!((a - b).length() < 1e-3, "item {} {:?} vs {:?}", i, a, b);
    }
}

#[test]
fn items_stay_on_their_circle() {
    let o = OrbitMotion::new(OrbitConfig::default(), four_skills());
    let centre = Vec3::new(0.0, 0.0, -constants::ORBIT_Z_OFFSET);
    for i in 0..4 {
        for k in 0..20 {
            let p = o.position(i, k as f32 * 0.37).unwrap();
            assert!(((p - centre).length() - constants::ORBIT_RADIUS).abs() < 1e-4);
        }
    }
}

#[test]
fn free_function_matches_method() {
    let o = OrbitMotion::new(OrbitConfig::default(), four_skills());
    let p = orbit_position(
        1,
        4,
        2.0,
        constants::ORBIT_SPEED,
        constants::ORBIT_RADIUS,
        constants::ORBIT_Z_OFFSET,
    );
    assert!((p - o.position(1, 2.0).unwrap()).length() < 1e-6);
}

#[test]
fn first_item_starts_on_positive_x() {
    let o = OrbitMotion::new(OrbitConfig::default(), four_skills());
    let p = o.position(0, 0.0).unwrap();
    assert!((p - Vec3::new(2.5, 0.0, -2.0)).length() < 1e-6);
}

#[test]
fn orientation_faces_look_at_point() {
    let o = OrbitMotion::new(OrbitConfig::default(), four_skills());
    let t = 0.8;
    for i in 0..4 {
        let facing = o.orientation(i, t).unwrap() * Vec3::Z;
        let want = (Vec3::new(0.0, 0.0, 5.0) - o.position(i, t).unwrap()).normalize();
        assert!(facing.dot(want) > 0.999);
    }
}

#[test]
fn ray_through_item_picks_it() {
    let o = OrbitMotion::new(OrbitConfig::default(), four_skills());
    let eye = Vec3::new(0.0, 0.0, 6.0);
    for i in 0..4 {
        let target = o.position(i, 0.5).unwrap();
        let dir = (target - eye).normalize();
        assert_eq!(o.pick(eye, dir, 0.5), Some(i));
    }
    assert_eq!(o.pick(eye, Vec3::Y, 0.5), None);
}

#[test]
fn hover_callback_fires_only_on_change() {
    let mut o = OrbitMotion::new(OrbitConfig::default(), four_skills());
    let calls = Rc::new(Cell::new(0));
    let last = Rc::new(RefCell::new(None::<String>));
    let (c, l) = (calls.clone(), last.clone());
    o.set_on_hover(move |item| {
        c.set(c.get() + 1);
        *l.borrow_mut() = item.map(|it| it.label.clone());
    });

    assert!(o.update_hover(Some(1)));
    assert!(!o.update_hover(Some(1)));
    assert_eq!(calls.get(), 1);
    assert_eq!(last.borrow().as_deref(), Some("B"));

    assert!(o.update_hover(None));
    assert_eq!(calls.get(), 2);
    assert_eq!(*last.borrow(), None);

    // Out-of-range hits count as no hover.
    assert!(!o.update_hover(Some(9)));
    assert_eq!(calls.get(), 2);
}

#[test]
fn step_resolves_hover_from_pick_ray() {
    let mut o = OrbitMotion::new(OrbitConfig::default(), four_skills());
    let t = 1.1;
    let eye = Vec3::new(0.0, 0.0, 6.0);
    let dir = (o.position(2, t).unwrap() - eye).normalize();
    o.set_pick_ray(Some((eye, dir)));
    o.step(&frame_at(t));
    assert_eq!(o.hovered().map(|it| it.label.as_str()), Some("C"));

    o.set_pick_ray(None);
    o.step(&frame_at(t + 0.1));
    assert!(o.hovered().is_none());
}

#[test]
fn connection_lines_end_at_items() {
    let mut o = OrbitMotion::new(OrbitConfig::default(), four_skills());
    o.step(&frame_at(3.0));
    let lines = o.connection_lines();
    assert_eq!(lines.len(), 4 * 6);
    for (i, seg) in lines.chunks_exact(6).enumerate() {
        assert_eq!(&seg[..3], &[0.0, 0.0, 0.0]);
        let end = Vec3::new(seg[3], seg[4], seg[5]);
        assert!((end - o.position(i, 3.0).unwrap()).length() < 1e-6);
    }
}

#[test]
fn emit_draws_core_and_every_node() {
    let mut o = OrbitMotion::new(OrbitConfig::default(), four_skills());
    o.step(&frame_at(0.0));
    let mut scene = Scene::default();
    o.emit(&mut scene);
    // core + glow + 10 dots per line + one node per item
    assert_eq!(scene.sprites.len(), 2 + 4 * 10 + 4);
}

#[test]
fn empty_orbit_is_harmless() {
    let mut o = OrbitMotion::new(OrbitConfig::default(), Vec::new());
    o.set_pick_ray(Some((Vec3::ZERO, Vec3::Z)));
    o.step(&frame_at(1.0));
    assert!(o.hovered().is_none());
    assert!(o.connection_lines().is_empty());
}

#[test]
fn parse_hex_accepts_with_and_without_hash() {
    assert_eq!(parse_hex_rgb("#ff0000"), Some([1.0, 0.0, 0.0]));
    assert_eq!(parse_hex_rgb("00FF00"), Some([0.0, 1.0, 0.0]));
    assert_eq!(parse_hex_rgb("#fff"), None);
    assert_eq!(parse_hex_rgb("#gg0000"), None);
}

#[test]
fn skill_list_skips_malformed_entries() {
    let items = parse_skill_list("React:#61DAFB, broken, Go:zzzzzz, :#ffffff,Rust:#DEA584,");
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["React", "Rust"]);
    assert_eq!(items[0].angular_phase, 0.0);
    assert!((items[1].angular_phase - PI).abs() < 1e-6);
}

#[test]
fn out_of_range_index_has_no_position() {
    let o = OrbitMotion::new(OrbitConfig::default(), four_skills());
    assert!(o.position(3, 0.0).is_some());
    assert_eq!(o.position(4, 0.0), None);
    assert_eq!(o.orientation(4, 0.0), None);

    let empty = OrbitMotion::new(OrbitConfig::default(), Vec::new());
    assert_eq!(empty.position(0, 1.0), None);
}
