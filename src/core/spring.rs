use super::animate::{Animatable, FrameInput};
use super::constants::{SPRING_DAMPING, SPRING_STRENGTH};
use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpringState {
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Clone, Copy, Debug)]
pub struct SpringParams {
    pub strength: f32,
    pub damping: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            strength: SPRING_STRENGTH,
            damping: SPRING_DAMPING,
        }
    }
}

/// Semi-implicit Euler spring that chases a 2D target once per frame.
///
/// The step is deliberately not scaled by frame delta: the motion is tuned
/// per display frame, so a 120Hz display settles twice as fast as a 60Hz one.
#[derive(Clone, Debug)]
pub struct SpringFollower {
    params: SpringParams,
    state: SpringState,
}

impl SpringFollower {
    pub fn new(params: SpringParams) -> Self {
        let mut params = params;
        if !(params.damping > 0.0 && params.damping < 1.0) {
            log::warn!(
                "[spring] damping {} outside (0,1); using {}",
                params.damping,
                SPRING_DAMPING
            );
            params.damping = SPRING_DAMPING;
        }
        if !(params.strength > 0.0 && params.strength * params.damping < 1.0) {
            log::warn!(
                "[spring] strength {} would not converge; using {}",
                params.strength,
                SPRING_STRENGTH
            );
            params.strength = SPRING_STRENGTH;
        }
        Self {
            params,
            state: SpringState::default(),
        }
    }

    pub fn params(&self) -> SpringParams {
        self.params
    }

    pub fn state(&self) -> SpringState {
        self.state
    }

    pub fn reset(&mut self, position: Vec2) {
        self.state = SpringState {
            position,
            velocity: Vec2::ZERO,
        };
    }

    pub fn step(&mut self, target: Vec2, _dt: f32) -> SpringState {
        let s = &mut self.state;
        s.velocity += (target - s.position) * self.params.strength;
        s.velocity *= self.params.damping;
        s.position += s.velocity;
        *s
    }
}

/// Standalone, a follower chases the raw pointer sample.
impl Animatable for SpringFollower {
    fn step(&mut self, frame: &FrameInput) {
        SpringFollower::step(self, frame.pointer.to_vec2(), frame.dt);
    }
}

impl Default for SpringFollower {
    fn default() -> Self {
        Self::new(SpringParams::default())
    }
}

#[inline]
pub fn lerp(start: f32, end: f32, factor: f32) -> f32 {
    start + (end - start) * factor
}
