use super::animate::{Animatable, FrameInput, Scene, Sprite};
use super::constants::*;
use super::pointer::PointerSample;
use glam::{Vec2, Vec3};
use rand::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub base_position: Vec3,
}

#[derive(Clone, Debug)]
pub struct ParticleConfig {
    pub count: usize,
    /// Extent of the random placement box.
    pub spread: Vec3,
    pub z_center: f32,
    /// Pointer NDC -> world scale used for the repulsion test.
    pub pointer_scale: f32,
    pub repulsion_radius: f32,
    pub repulsion_strength: f32,
    pub restore: f32,
    pub drift: f32,
    pub damping: f32,
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            spread: Vec3::from_array(PARTICLE_SPREAD),
            z_center: PARTICLE_Z_CENTER,
            pointer_scale: PARTICLE_POINTER_SCALE,
            repulsion_radius: PARTICLE_REPULSION_RADIUS,
            repulsion_strength: PARTICLE_REPULSION_STRENGTH,
            restore: PARTICLE_RESTORE,
            drift: PARTICLE_DRIFT,
            damping: PARTICLE_DAMPING,
            seed: 7,
        }
    }
}

/// Fixed-size cloud of particles pushed around by the pointer.
pub struct ParticleField {
    config: ParticleConfig,
    particles: Vec<Particle>,
    buffer: Vec<f32>,
    revision: u64,
    uploaded_revision: u64,
}

impl ParticleField {
    pub fn new(config: ParticleConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let random_point = |rng: &mut StdRng| {
            Vec3::new(
                (rng.gen::<f32>() - 0.5) * config.spread.x,
                (rng.gen::<f32>() - 0.5) * config.spread.y,
                (rng.gen::<f32>() - 0.5) * config.spread.z + config.z_center,
            )
        };
        let starts: Vec<Vec3> = (0..config.count).map(|_| random_point(&mut rng)).collect();
        let particles = starts
            .into_iter()
            .map(|position| Particle {
                position,
                velocity: Vec3::ZERO,
                base_position: random_point(&mut rng),
            })
            .collect::<Vec<_>>();
        let mut field = Self {
            buffer: vec![0.0; config.count * 3],
            config,
            particles,
            revision: 0,
            uploaded_revision: 0,
        };
        field.write_buffer();
        field
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Flat xyz positions, in particle order.
    pub fn positions(&self) -> &[f32] {
        &self.buffer
    }

    /// Incremented once per completed step.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True once per new revision; the caller uploads the buffer when it is.
    pub fn take_dirty(&mut self) -> bool {
        let dirty = self.uploaded_revision != self.revision;
        self.uploaded_revision = self.revision;
        dirty
    }

    pub fn step_with(&mut self, pointer: PointerSample, elapsed: f32) {
        let cfg = &self.config;
        let target = pointer.to_vec2() * cfg.pointer_scale;
        for (i, p) in self.particles.iter_mut().enumerate() {
            let delta = Vec2::new(p.position.x, p.position.y) - target;
            let dist = delta.length();
            if dist < cfg.repulsion_radius && dist > f32::EPSILON {
                let force = (cfg.repulsion_radius - dist) * cfg.repulsion_strength;
                let dir = delta / dist;
                p.velocity.x += dir.x * force;
                p.velocity.y += dir.y * force;
            }

            p.velocity += (p.base_position - p.position) * cfg.restore;
            p.velocity.y += (elapsed + i as f32 * 0.1).sin() * cfg.drift;
            p.velocity *= cfg.damping;
            p.position += p.velocity;
        }
        self.write_buffer();
        self.revision += 1;
    }

    fn write_buffer(&mut self) {
        for (dst, p) in self.buffer.chunks_exact_mut(3).zip(&self.particles) {
            dst.copy_from_slice(&p.position.to_array());
        }
    }
}

impl Animatable for ParticleField {
    fn step(&mut self, frame: &FrameInput) {
        self.step_with(frame.pointer, frame.elapsed);
    }

    /// Rewrites the scene's cached layer only when a step produced a new buffer.
    fn emit(&mut self, scene: &mut Scene) {
        if !self.take_dirty() {
            return;
        }
        scene.cached.replace(self.buffer.chunks_exact(3).map(|xyz| {
            Sprite::new(Vec3::new(xyz[0], xyz[1], xyz[2]), 0.08, [1.0, 1.0, 1.0], 0.4)
        }));
    }
}
