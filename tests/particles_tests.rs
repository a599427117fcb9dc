// Host-side tests for the pointer-repelled particle field.
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
mod particles {
    include!("../src/core/particles.rs");
}

use animate::*;
use glam::Vec3;
use particles::*;
use pointer::PointerSample;

fn quiet_config() -> ParticleConfig {
    ParticleConfig {
        drift: 0.0,
        // Pointer maps far outside the cloud, so repulsion never applies.
        pointer_scale: 1000.0,
        ..ParticleConfig::default()
    }
}

#[test]
fn count_is_fixed() {
    let mut f = ParticleField::new(ParticleConfig::default());
    assert_eq!(f.len(), constants::PARTICLE_COUNT);
    for k in 0..50 {
        f.step_with(PointerSample::new(0.3, -0.2), k as f32 / 60.0);
    }
    assert_eq!(f.len(), constants::PARTICLE_COUNT);
    assert_eq!(f.positions().len(), constants::PARTICLE_COUNT * 3);
}

#[test]
fn same_seed_same_cloud() {
    let a = ParticleField::new(ParticleConfig::default());
    let b = ParticleField::new(ParticleConfig::default());
    assert_eq!(a.particles(), b.particles());
    let c = ParticleField::new(ParticleConfig {
        seed: 99,
        ..ParticleConfig::default()
    });
    assert_ne!(a.particles(), c.particles());
}

#[test]
fn initial_positions_lie_in_spread_box() {
    let f = ParticleField::new(ParticleConfig::default());
    for p in f.particles() {
        for v in [p.position, p.base_position] {
            assert!(v.x.abs() <= 4.0 && v.y.abs() <= 4.0);
            assert!((v.z + 2.0).abs() <= 2.0);
        }
    }
}

#[test]
fn particles_settle_on_base_without_pointer_or_drift() {
    let mut f = ParticleField::new(quiet_config());
    for k in 0..1000 {
        f.step_with(PointerSample::new(1.0, 1.0), k as f32 / 60.0);
    }
    for p in f.particles() {
        assert!(
            (p.position - p.base_position).length() < 1e-3,
            "{:?} vs {:?}",
            p.position,
            p.base_position
        );
    }
}

#[test]
fn pointer_pushes_nearby_particles_away() {
    let mut f = ParticleField::new(ParticleConfig {
        count: 1,
        spread: Vec3::ZERO,
        z_center: 0.0,
        restore: 0.0,
        drift: 0.0,
        ..ParticleConfig::default()
    });
    // Particle at origin, pointer target at (0.4 * 4, 0) = (1.6, 0).
    f.step_with(PointerSample::new(0.4, 0.0), 0.0);
    let p = f.particles()[0];
    assert!(p.velocity.x < 0.0);
    assert_eq!(p.velocity.y, 0.0);
    assert!(p.position.x < 0.0);
}

#[test]
fn coincident_pointer_stays_finite() {
    let mut f = ParticleField::new(ParticleConfig {
        count: 1,
        spread: Vec3::ZERO,
        z_center: 0.0,
        ..ParticleConfig::default()
    });
    for k in 0..10 {
        f.step_with(PointerSample::new(0.0, 0.0), k as f32);
    }
    assert!(f.positions().iter().all(|v| v.is_finite()));
}

#[test]
fn revision_advances_once_per_step() {
    let mut f = ParticleField::new(ParticleConfig::default());
    assert_eq!(f.revision(), 0);
    assert!(!f.take_dirty());
    f.step_with(PointerSample::default(), 0.0);
    f.step_with(PointerSample::default(), 0.016);
    assert_eq!(f.revision(), 2);
    assert!(f.take_dirty());
    assert!(!f.take_dirty());
}

#[test]
fn buffer_mirrors_particle_positions() {
    let mut f = ParticleField::new(ParticleConfig::default());
    f.step_with(PointerSample::new(-0.5, 0.5), 0.25);
    for (xyz, p) in f.positions().chunks_exact(3).zip(f.particles()) {
        assert_eq!(xyz, &p.position.to_array());
    }
}

#[test]
fn animatable_step_uses_frame_pointer_and_clock() {
    let mut a = ParticleField::new(ParticleConfig::default());
    let mut b = ParticleField::new(ParticleConfig::default());
    let frame = FrameInput {
        pointer: PointerSample::new(0.2, 0.1),
        elapsed: 1.5,
        dt: 1.0 / 60.0,
    };
    a.step(&frame);
    b.step_with(frame.pointer, frame.elapsed);
    assert_eq!(a.positions(), b.positions());

    let mut scene = Scene::default();
    a.emit(&mut scene);
    assert!(scene.sprites.is_empty());
    assert_eq!(scene.cached.sprites.len(), a.len());
}

#[test]
fn collect_without_step_leaves_cached_layer_clean() {
    let mut set = AnimationSet::new();
    set.push(ParticleField::new(ParticleConfig::default()));
    let mut scene = Scene::default();

    set.step(&FrameInput::default());
    set.collect(&mut scene);
    assert!(scene.cached.dirty);
    assert_eq!(scene.cached.sprites.len(), constants::PARTICLE_COUNT);
    let first = scene.cached.sprites[0];

    set.collect(&mut scene);
    assert!(!scene.cached.dirty);
    assert_eq!(scene.cached.sprites.len(), constants::PARTICLE_COUNT);
    assert_eq!(scene.cached.sprites[0], first);

    set.step(&FrameInput {
        pointer: PointerSample::new(0.1, 0.1),
        elapsed: 0.5,
        dt: 1.0 / 60.0,
    });
    set.collect(&mut scene);
    assert!(scene.cached.dirty);
}
