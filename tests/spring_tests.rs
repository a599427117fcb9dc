// Host-side tests for the spring follower.
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
mod spring {
    include!("../src/core/spring.rs");
}

use animate::{Animatable, AnimationSet, FrameInput};
use glam::Vec2;
use pointer::PointerSample;
use spring::*;
use std::cell::RefCell;
use std::rc::Rc;

const DT: f32 = 1.0 / 60.0;

#[test]
fn converges_to_fixed_target() {
    let mut s = SpringFollower::default();
    let target = Vec2::new(1.5, -0.75);
    for _ in 0..200 {
        s.step(target, DT);
    }
    let st = s.state();
    assert!((st.position - target).length() < 1e-3, "{:?}", st.position);
    assert!(st.velocity.length() < 1e-3);
}

#[test]
fn first_step_moves_towards_target() {
    let mut s = SpringFollower::default();
    let st = s.step(Vec2::new(1.0, 0.0), DT);
    // v = (1 * 0.08) * 0.85, p = v
    assert!((st.velocity.x - 0.068).abs() < 1e-6);
    assert!((st.position.x - 0.068).abs() < 1e-6);
    assert_eq!(st.position.y, 0.0);
}

#[test]
fn step_ignores_frame_delta() {
    let mut a = SpringFollower::default();
    let mut b = SpringFollower::default();
    let target = Vec2::new(0.3, 0.9);
    for _ in 0..10 {
        a.step(target, 1.0 / 30.0);
        b.step(target, 1.0 / 144.0);
    }
    assert_eq!(a.state(), b.state());
}

#[test]
fn invalid_params_fall_back_to_defaults() {
    let s = SpringFollower::new(SpringParams {
        strength: 0.08,
        damping: 1.5,
    });
    assert_eq!(s.params().damping, constants::SPRING_DAMPING);

    let s = SpringFollower::new(SpringParams {
        strength: -1.0,
        damping: 0.5,
    });
    assert_eq!(s.params().strength, constants::SPRING_STRENGTH);
    assert_eq!(s.params().damping, 0.5);
}

#[test]
fn reset_clears_velocity() {
    let mut s = SpringFollower::default();
    s.step(Vec2::ONE, DT);
    s.reset(Vec2::new(2.0, 2.0));
    assert_eq!(s.state().position, Vec2::new(2.0, 2.0));
    assert_eq!(s.state().velocity, Vec2::ZERO);
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
    assert_eq!(lerp(2.0, 4.0, 0.25), 2.5);
}

#[test]
fn as_animatable_chases_pointer() {
    let follower = Rc::new(RefCell::new(SpringFollower::default()));
    let mut set = AnimationSet::new();
    set.push(follower.clone());
    let frame = FrameInput {
        pointer: PointerSample::new(-0.5, 0.25),
        elapsed: 0.0,
        dt: DT,
    };
    for _ in 0..200 {
        set.step(&frame);
    }
    let p = follower.borrow().state().position;
    assert!((p - Vec2::new(-0.5, 0.25)).length() < 1e-3);
}
