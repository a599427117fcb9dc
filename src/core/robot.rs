use super::animate::{Animatable, FrameInput, Scene, Sprite};
use super::constants::*;
use super::spring::SpringFollower;
use glam::{EulerRot, Quat, Vec2, Vec3};
use rand::prelude::*;

const HEAD_COLOR: [f32; 3] = [0.102, 0.102, 0.180]; // #1a1a2e
const FACE_COLOR: [f32; 3] = [0.059, 0.059, 0.102]; // #0f0f1a
const EYE_SOCKETS: [[f32; 2]; 2] = [[-0.25, 0.15], [0.25, 0.15]];

/// Random blinking: every interval, blink with some probability.
#[derive(Clone, Debug)]
pub struct BlinkTimer {
    rng: StdRng,
    next_check: f32,
    blink_until: f32,
}

impl BlinkTimer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            next_check: ROBOT_BLINK_INTERVAL_SEC,
            blink_until: f32::NEG_INFINITY,
        }
    }

    /// Advance to `elapsed` seconds; returns whether the eyes are closed.
    pub fn update(&mut self, elapsed: f32) -> bool {
        while elapsed >= self.next_check {
            if self.rng.gen::<f32>() < ROBOT_BLINK_CHANCE {
                self.blink_until = self.next_check + ROBOT_BLINK_DURATION_SEC;
            }
            self.next_check += ROBOT_BLINK_INTERVAL_SEC;
        }
        elapsed < self.blink_until
    }
}

/// Mascot head that tilts towards the pointer.
pub struct RobotHead {
    tilt: SpringFollower,
    blink: BlinkTimer,
    blinking: bool,
    happy: bool,
    pupil_offset: Vec2,
    antenna_angle: f32,
    float_offset: f32,
}

impl RobotHead {
    pub fn new(tilt: SpringFollower, seed: u64) -> Self {
        Self {
            tilt,
            blink: BlinkTimer::new(seed),
            blinking: false,
            happy: false,
            pupil_offset: Vec2::ZERO,
            antenna_angle: 0.0,
            float_offset: 0.0,
        }
    }

    /// Head rotation (x, y) in radians.
    pub fn tilt(&self) -> Vec2 {
        self.tilt.state().position
    }

    pub fn is_happy(&self) -> bool {
        self.happy
    }

    pub fn is_blinking(&self) -> bool {
        self.blinking
    }

    pub fn pupil_offset(&self) -> Vec2 {
        self.pupil_offset
    }

    pub fn antenna_angle(&self) -> f32 {
        self.antenna_angle
    }

    fn head_rotation(&self) -> Quat {
        let t = self.tilt();
        Quat::from_euler(EulerRot::XYZ, t.x, t.y, 0.0)
    }
}

impl Animatable for RobotHead {
    fn step(&mut self, frame: &FrameInput) {
        let p = frame.pointer;
        let target = Vec2::new(-p.y * ROBOT_TILT_X, p.x * ROBOT_TILT_Y);
        let tilt = self.tilt.step(target, frame.dt).position;
        self.pupil_offset = Vec2::new(
            p.x * ROBOT_PUPIL_OFFSET[0],
            p.y * ROBOT_PUPIL_OFFSET[1],
        );
        self.antenna_angle = (frame.elapsed * 3.0).sin() * 0.1 + tilt.y * 0.5;
        self.happy = p.length() < ROBOT_HAPPY_RADIUS;
        self.blinking = self.blink.update(frame.elapsed);
        self.float_offset = (frame.elapsed * 2.0).sin() * 0.05;
    }

    fn emit(&mut self, scene: &mut Scene) {
        let rot = self.head_rotation();
        let origin = Vec3::new(0.0, self.float_offset, 0.0);
        let mut put = |local: Vec3, size: f32, rgb: [f32; 3], alpha: f32| {
            scene
                .sprites
                .push(Sprite::new(origin + rot * local, size, rgb, alpha));
        };

        put(Vec3::new(0.0, 0.0, 0.0), 1.3, HEAD_COLOR, 1.0);
        put(Vec3::new(-0.65, 0.1, 0.0), 0.3, INDIGO, 1.0);
        put(Vec3::new(0.65, 0.1, 0.0), 0.3, INDIGO, 1.0);
        put(Vec3::new(0.0, 0.0, 0.4), 1.0, FACE_COLOR, 1.0);

        let pupil_size = if self.blinking { 0.016 } else { 0.16 };
        for [ex, ey] in EYE_SOCKETS {
            put(Vec3::new(ex, ey, 0.45), 0.36, INDIGO, 1.0);
            put(
                Vec3::new(ex + self.pupil_offset.x, ey + self.pupil_offset.y, 0.47),
                pupil_size,
                [1.0, 1.0, 1.0],
                1.0,
            );
        }

        let (mouth_rgb, mouth_size) = if self.happy {
            (GREEN, 0.3)
        } else {
            (INDIGO, 0.12)
        };
        put(Vec3::new(0.0, -0.2, 0.46), mouth_size, mouth_rgb, 1.0);
        if self.happy {
            put(Vec3::new(-0.4, 0.0, 0.42), 0.16, PINK, 0.6);
            put(Vec3::new(0.4, 0.0, 0.42), 0.16, PINK, 0.6);
        }

        let antenna = Quat::from_rotation_z(self.antenna_angle);
        let base = Vec3::new(0.0, 0.6, 0.0);
        put(base + antenna * Vec3::new(0.0, 0.0, 0.0), 0.06, INDIGO, 1.0);
        put(base + antenna * Vec3::new(0.0, 0.2, 0.0), 0.16, PINK, 1.0);

        for (x, rgb) in [(-0.35, GREEN), (-0.25, AMBER), (-0.15, RED)] {
            put(Vec3::new(x, -0.35, 0.42), 0.06, rgb, 1.0);
        }
    }
}
