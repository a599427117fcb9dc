use super::animate::{Animatable, FrameInput, Scene, Sprite};
use super::constants::*;
use super::spring::{lerp, SpringFollower, SpringState};
use glam::{EulerRot, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

#[derive(Clone, Copy, Debug)]
pub struct Ring {
    pub radius: f32,
    pub speed: f32,
    pub color: [f32; 3],
    pub rotation_offset: f32,
}

pub const DEFAULT_RINGS: [Ring; 3] = [
    Ring {
        radius: 1.2,
        speed: 1.0,
        color: PINK,
        rotation_offset: 0.0,
    },
    Ring {
        radius: 1.4,
        speed: -0.7,
        color: CYAN,
        rotation_offset: FRAC_PI_4,
    },
    Ring {
        radius: 1.0,
        speed: 1.5,
        color: AMBER,
        rotation_offset: FRAC_PI_2,
    },
];

const RING_DOT_ANGLES: [f32; 4] = [0.0, FRAC_PI_2, PI, PI * 1.5];

impl Ring {
    pub fn rotation(&self, elapsed: f32) -> Quat {
        let rx = (elapsed * 0.5).sin() * 0.3 + self.rotation_offset;
        let rz = elapsed * self.speed + self.rotation_offset;
        Quat::from_euler(EulerRot::XYZ, rx, 0.0, rz)
    }

    /// Ring-local positions of the four marker dots.
    pub fn dots(&self) -> impl Iterator<Item = Vec3> + '_ {
        RING_DOT_ANGLES
            .iter()
            .map(move |a| Vec3::new(a.cos() * self.radius, a.sin() * self.radius, 0.0))
    }
}

/// Floating geometry that chases the pointer on a spring.
pub struct CursorFollower {
    spring: SpringFollower,
    rings: Vec<Ring>,
    rotation: Vec3,
    elapsed: f32,
}

impl CursorFollower {
    pub fn new(spring: SpringFollower) -> Self {
        Self {
            spring,
            rings: DEFAULT_RINGS.to_vec(),
            rotation: Vec3::ZERO,
            elapsed: 0.0,
        }
    }

    pub fn state(&self) -> SpringState {
        self.spring.state()
    }

    /// Euler rotation (x, y, z) of the geometry group.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn position(&self) -> Vec3 {
        self.spring.state().position.extend(0.0)
    }

    fn group_rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new(SpringFollower::default())
    }
}

impl Animatable for CursorFollower {
    fn step(&mut self, frame: &FrameInput) {
        let target = frame.pointer.to_vec2() * FOLLOW_TARGET_SCALE;
        let s = self.spring.step(target, frame.dt);
        self.rotation.x = s.velocity.y * FOLLOW_TILT_FROM_VELOCITY;
        self.rotation.y = -s.velocity.x * FOLLOW_TILT_FROM_VELOCITY;
        self.rotation.z = (self.rotation.z + frame.dt * FOLLOW_SPIN_PER_SEC) % TAU;
        self.elapsed = frame.elapsed;
    }

    fn emit(&mut self, scene: &mut Scene) {
        let center = self.position();
        scene.sprites.push(Sprite::new(center, 1.6, INDIGO, 0.9));
        scene.sprites.push(Sprite::new(center + Vec3::Z * 0.05, 1.0, PURPLE, 0.6));
        let group = self.group_rotation();
        for ring in &self.rings {
            let r = group * ring.rotation(self.elapsed);
            for dot in ring.dots() {
                scene
                    .sprites
                    .push(Sprite::new(center + r * dot, 0.08, ring.color, 1.0));
            }
        }
    }
}

/// Eight wobbling segments that lean from a fixed circle towards the pointer.
pub struct ConnectionLines {
    bases: Vec<[f32; 2]>,
    buffer: Vec<f32>,
}

impl ConnectionLines {
    pub fn new(count: usize) -> Self {
        let bases = (0..count)
            .map(|i| {
                let angle = (i as f32 / count as f32) * TAU;
                [angle.cos() * LINE_BASE_RADIUS, angle.sin() * LINE_BASE_RADIUS]
            })
            .collect();
        Self {
            bases,
            buffer: vec![0.0; count * 6],
        }
    }

    /// Two xyz endpoints per line.
    pub fn segments(&self) -> &[f32] {
        &self.buffer
    }
}

impl Default for ConnectionLines {
    fn default() -> Self {
        Self::new(LINE_COUNT)
    }
}

impl Animatable for ConnectionLines {
    fn step(&mut self, frame: &FrameInput) {
        let t = frame.elapsed;
        let pointer = frame.pointer.to_vec2() * FOLLOW_TARGET_SCALE;
        for (i, (base, seg)) in self
            .bases
            .iter()
            .zip(self.buffer.chunks_exact_mut(6))
            .enumerate()
        {
            let fi = i as f32;
            let sx = base[0] + (t + fi).sin() * LINE_WOBBLE;
            let sy = base[1] + (t + fi).cos() * LINE_WOBBLE;
            let tx = pointer.x + (t * 2.0 + fi).sin() * LINE_TARGET_WOBBLE;
            let ty = pointer.y + (t * 2.0 + fi).cos() * LINE_TARGET_WOBBLE;
            seg.copy_from_slice(&[
                sx,
                sy,
                -2.0,
                lerp(sx, tx, LINE_REACH),
                lerp(sy, ty, LINE_REACH),
                -1.0,
            ]);
        }
    }

    fn emit(&mut self, scene: &mut Scene) {
        let color = [INDIGO[0], INDIGO[1], INDIGO[2], 0.15];
        for seg in self.buffer.chunks_exact(6) {
            scene.push_dotted_line(
                Vec3::new(seg[0], seg[1], seg[2]),
                Vec3::new(seg[3], seg[4], seg[5]),
                8,
                0.03,
                color,
            );
        }
    }
}
