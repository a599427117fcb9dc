use super::constants::{
    CELEBRATION_DURATION_SEC, CONFETTI_COUNT, HINT_DELAY_SEC, HINT_VISIBLE_SEC,
};
use rand::prelude::*;
use std::collections::VecDeque;

/// ↑ ↑ ↓ ↓ ← → ← → B A, as `KeyboardEvent.code` values.
pub const KONAMI_CODE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "KeyB",
    "KeyA",
];

/// Sliding-window matcher over the last `target.len()` inputs.
#[derive(Clone, Debug)]
pub struct SequenceDetector<T> {
    target: Vec<T>,
    window: VecDeque<T>,
}

impl<T: PartialEq + Clone> SequenceDetector<T> {
    pub fn new(target: Vec<T>) -> Self {
        let window = VecDeque::with_capacity(target.len());
        Self { target, window }
    }

    /// Push one input code; true iff the window now equals the target.
    pub fn on_input(&mut self, code: T) -> bool {
        if self.target.is_empty() {
            return false;
        }
        if self.window.len() == self.target.len() {
            self.window.pop_front();
        }
        self.window.push_back(code);
        self.window.len() == self.target.len()
            && self.window.iter().zip(&self.target).all(|(a, b)| a == b)
    }

    pub fn reset(&mut self) {
        self.window.clear();
    }
}

impl SequenceDetector<String> {
    pub fn konami() -> Self {
        Self::new(KONAMI_CODE.iter().map(|s| s.to_string()).collect())
    }
}

/// Timed "activated" state owned by whoever reacts to a detector match.
#[derive(Clone, Debug)]
pub struct Celebration {
    duration: f64,
    active: bool,
    /// One deadline per activation, oldest first; the earliest one ends the celebration.
    deadlines: VecDeque<f64>,
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new(CELEBRATION_DURATION_SEC)
    }
}

impl Celebration {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            active: false,
            deadlines: VecDeque::new(),
        }
    }

    /// Start the celebration and schedule its end. A retrigger does not
    /// extend an ongoing one; the earlier deadline still ends it.
    pub fn activate(&mut self, now: f64) {
        self.active = true;
        self.deadlines.push_back(now + self.duration);
    }

    pub fn is_active(&self, now: f64) -> bool {
        self.active && self.deadlines.front().is_some_and(|end| now < *end)
    }

    /// True exactly once per ended celebration, on the first poll at or after its deadline.
    pub fn poll_expired(&mut self, now: f64) -> bool {
        let mut ended = false;
        while self.deadlines.front().is_some_and(|end| now >= *end) {
            self.deadlines.pop_front();
            ended = true;
        }
        let was_active = self.active;
        if ended {
            self.active = false;
        }
        ended && was_active
    }
}

/// When the subtle key hint is on screen, measured from page start.
#[derive(Clone, Copy, Debug)]
pub struct HintSchedule {
    pub delay: f64,
    pub visible_for: f64,
}

impl Default for HintSchedule {
    fn default() -> Self {
        Self {
            delay: HINT_DELAY_SEC,
            visible_for: HINT_VISIBLE_SEC,
        }
    }
}

impl HintSchedule {
    pub fn is_visible(&self, since_start: f64, celebrating: bool) -> bool {
        !celebrating && since_start >= self.delay && since_start < self.delay + self.visible_for
    }
}

pub const CONFETTI_COLORS: [[u8; 3]; 7] = [
    [0xff, 0x00, 0x00],
    [0xff, 0x80, 0x00],
    [0xff, 0xff, 0x00],
    [0x00, 0xff, 0x00],
    [0x00, 0xff, 0xff],
    [0x00, 0x80, 0xff],
    [0x80, 0x00, 0xff],
];

#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiPiece {
    /// Horizontal start, percent of viewport width.
    pub left_percent: f32,
    pub color: [u8; 3],
    pub duration: f32,
    pub delay: f32,
    /// Total horizontal travel in CSS pixels.
    pub drift_px: f32,
    /// Total spin in degrees.
    pub spin_deg: f32,
}

/// Where a piece is `t` seconds after the burst started.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfettiPose {
    pub x_px: f32,
    pub y_px: f32,
    pub rotation_deg: f32,
    pub opacity: f32,
}

impl ConfettiPiece {
    pub fn sample(&self, t: f32, viewport_height: f32) -> ConfettiPose {
        let start_y = -20.0;
        let end_y = viewport_height + 50.0;
        let k = ((t - self.delay) / self.duration).clamp(0.0, 1.0);
        // Opacity keyframes 1 -> 1 -> 0 spread evenly over the fall.
        let opacity = if k < 0.5 { 1.0 } else { 1.0 - (k - 0.5) * 2.0 };
        ConfettiPose {
            x_px: self.drift_px * k,
            y_px: start_y + (end_y - start_y) * k,
            rotation_deg: self.spin_deg * k,
            opacity,
        }
    }

    pub fn finished(&self, t: f32) -> bool {
        t >= self.delay + self.duration
    }
}

pub struct ConfettiBurst {
    pub pieces: Vec<ConfettiPiece>,
}

impl ConfettiBurst {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let pieces = (0..count)
            .map(|_| ConfettiPiece {
                left_percent: rng.gen::<f32>() * 100.0,
                color: CONFETTI_COLORS[rng.gen_range(0..CONFETTI_COLORS.len())],
                duration: 3.0 + rng.gen::<f32>() * 2.0,
                delay: rng.gen::<f32>() * 0.5,
                drift_px: (rng.gen::<f32>() - 0.5) * 200.0,
                spin_deg: rng.gen::<f32>() * 720.0,
            })
            .collect();
        Self { pieces }
    }

    pub fn finished(&self, t: f32) -> bool {
        self.pieces.iter().all(|p| p.finished(t))
    }
}

/// What the overlay should show this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EasterEggView {
    pub celebrating: bool,
    pub hint_visible: bool,
    /// Seconds since the current confetti burst started, if one is falling.
    pub confetti_t: Option<f32>,
}

/// Detector, celebration timer, hint schedule and confetti in one place.
/// Times are seconds since page start.
pub struct EasterEgg {
    detector: SequenceDetector<String>,
    celebration: Celebration,
    hint: HintSchedule,
    burst: Option<(f64, ConfettiBurst)>,
    seed: u64,
    triggers: u32,
}

impl EasterEgg {
    pub fn new(seed: u64) -> Self {
        Self {
            detector: SequenceDetector::konami(),
            celebration: Celebration::default(),
            hint: HintSchedule::default(),
            burst: None,
            seed,
            triggers: 0,
        }
    }

    pub fn triggers(&self) -> u32 {
        self.triggers
    }

    pub fn burst(&self) -> Option<&ConfettiBurst> {
        self.burst.as_ref().map(|(_, b)| b)
    }

    /// Feed one key code; returns true when the sequence just completed.
    pub fn on_key(&mut self, code: String, now: f64) -> bool {
        if !self.detector.on_input(code) {
            return false;
        }
        self.triggers += 1;
        self.celebration.activate(now);
        let seed = self.seed.wrapping_add(self.triggers as u64);
        self.burst = Some((now, ConfettiBurst::new(CONFETTI_COUNT, seed)));
        true
    }

    pub fn tick(&mut self, now: f64) -> EasterEggView {
        if self.celebration.poll_expired(now) {
            log::info!("[easter] celebration over");
        }
        let celebrating = self.celebration.is_active(now);
        let confetti_t = match &self.burst {
            Some((start, burst)) => {
                let t = (now - start) as f32;
                if burst.finished(t) {
                    None
                } else {
                    Some(t)
                }
            }
            None => None,
        };
        if confetti_t.is_none() {
            self.burst = None;
        }
        EasterEggView {
            celebrating,
            hint_visible: self.hint.is_visible(now, celebrating),
            confetti_t,
        }
    }
}
