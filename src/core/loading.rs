use super::constants::*;
use rand::prelude::*;

pub const SCRAMBLE_GLYPHS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789@#$%&";
pub const RAIN_GLYPHS: &str =
    "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン01";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadingPhase {
    Loading,
    Revealing,
    Complete,
}

#[derive(Clone, Debug)]
pub struct LoadingConfig {
    pub min_duration_ms: f64,
    pub reveal_delay_ms: f64,
    pub scramble_tick_ms: f64,
    pub resolve_per_tick: f32,
    /// Progress (0..100) after which the title stops scrambling.
    pub scramble_cutoff: f32,
    pub title: String,
    pub seed: u64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: LOADING_MIN_DURATION_MS,
            reveal_delay_ms: LOADING_REVEAL_DELAY_MS,
            scramble_tick_ms: SCRAMBLE_TICK_MS,
            resolve_per_tick: SCRAMBLE_RESOLVE_PER_TICK,
            scramble_cutoff: SCRAMBLE_CUTOFF_PROGRESS,
            title: "PORTFOLIO".to_string(),
            seed: 1,
        }
    }
}

/// Left-to-right "decoding" of a fixed string over random glyphs.
#[derive(Clone, Debug)]
pub struct TextScramble {
    target: Vec<char>,
    glyphs: Vec<char>,
    rng: StdRng,
}

impl TextScramble {
    pub fn new(target: &str, seed: u64) -> Self {
        Self {
            target: target.chars().collect(),
            glyphs: SCRAMBLE_GLYPHS.chars().collect(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    /// Characters with index below `resolved` show the target; spaces always do.
    pub fn render(&mut self, resolved: f32) -> String {
        let glyphs = &self.glyphs;
        let rng = &mut self.rng;
        self.target
            .iter()
            .enumerate()
            .map(|(i, &ch)| {
                if ch == ' ' || (i as f32) < resolved {
                    ch
                } else {
                    *glyphs.choose(rng).unwrap_or(&ch)
                }
            })
            .collect()
    }
}

type CompletionCallback = Box<dyn FnOnce()>;

/// Cosmetic loading timer: Loading -> Revealing -> Complete, never backwards.
pub struct LoadingSequence {
    config: LoadingConfig,
    phase: LoadingPhase,
    progress: f32,
    ticks_seen: u64,
    scramble: TextScramble,
    text: String,
    revealing_since: Option<f64>,
    on_complete: Option<CompletionCallback>,
}

impl LoadingSequence {
    pub fn new(config: LoadingConfig) -> Self {
        let mut scramble = TextScramble::new(&config.title, config.seed);
        let text = scramble.render(0.0);
        Self {
            config,
            phase: LoadingPhase::Loading,
            progress: 0.0,
            ticks_seen: 0,
            scramble,
            text,
            revealing_since: None,
            on_complete: None,
        }
    }

    pub fn set_on_complete(&mut self, callback: impl FnOnce() + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    /// Percent in \[0, 100\].
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the title is still scrambling (drives the chromatic offset layers).
    pub fn is_glitching(&self) -> bool {
        self.phase == LoadingPhase::Loading && self.progress < self.config.scramble_cutoff
    }

    /// Advance to `elapsed_ms` since the sequence started.
    pub fn tick(&mut self, elapsed_ms: f64) -> LoadingPhase {
        if self.phase == LoadingPhase::Loading {
            self.progress = if self.config.min_duration_ms > 0.0 {
                ((elapsed_ms / self.config.min_duration_ms).min(1.0) * 100.0) as f32
            } else {
                100.0
            };
            self.advance_scramble(elapsed_ms);
            if self.progress >= 100.0 {
                self.phase = LoadingPhase::Revealing;
                self.revealing_since = Some(elapsed_ms);
                self.text = self.scramble.target();
                log::info!("[loading] revealing at {:.0}ms", elapsed_ms);
            }
        }
        if self.phase == LoadingPhase::Revealing {
            let since = self.revealing_since.unwrap_or(elapsed_ms);
            if elapsed_ms - since >= self.config.reveal_delay_ms {
                self.phase = LoadingPhase::Complete;
                log::info!("[loading] complete");
                if let Some(cb) = self.on_complete.take() {
                    cb();
                }
            }
        }
        self.phase
    }

    fn advance_scramble(&mut self, elapsed_ms: f64) {
        if self.config.scramble_tick_ms <= 0.0 {
            return;
        }
        let due = (elapsed_ms / self.config.scramble_tick_ms).floor().max(0.0) as u64;
        if due <= self.ticks_seen {
            return;
        }
        self.ticks_seen = due;
        if self.is_glitching() {
            // The tick that just fired rendered with the count before it.
            let resolved = (due - 1) as f32 * self.config.resolve_per_tick;
            self.text = self.scramble.render(resolved);
        } else {
            self.text = self.scramble.target();
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RainGlyph {
    pub x: f32,
    pub y: f32,
    pub glyph: char,
}

/// Column "digital rain" painted behind the loading screen.
pub struct MatrixRain {
    drops: Vec<u32>,
    height: f32,
    glyphs: Vec<char>,
    rng: StdRng,
}

impl MatrixRain {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let columns = (width.max(0.0) / RAIN_COLUMN_WIDTH).floor() as usize;
        Self {
            drops: vec![0; columns],
            height: height.max(0.0),
            glyphs: RAIN_GLYPHS.chars().collect(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn columns(&self) -> usize {
        self.drops.len()
    }

    pub fn drops(&self) -> &[u32] {
        &self.drops
    }

    /// Emit one glyph per column and advance every drop by a row.
    pub fn step(&mut self, out: &mut Vec<RainGlyph>) {
        out.clear();
        for (i, drop) in self.drops.iter_mut().enumerate() {
            let glyph = *self.glyphs.choose(&mut self.rng).unwrap_or(&'0');
            let y = *drop as f32 * RAIN_COLUMN_WIDTH;
            out.push(RainGlyph {
                x: i as f32 * RAIN_COLUMN_WIDTH,
                y,
                glyph,
            });
            if y > self.height && self.rng.gen::<f32>() < RAIN_RESET_CHANCE {
                *drop = 0;
            }
            *drop += 1;
        }
    }
}
