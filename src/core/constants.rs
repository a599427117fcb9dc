// Shared motion tuning constants used by the pure animation modules.

// Spring follower
pub const SPRING_STRENGTH: f32 = 0.08;
pub const SPRING_DAMPING: f32 = 0.85;

// Cursor follower
pub const FOLLOW_TARGET_SCALE: f32 = 2.0; // pointer units -> world units
pub const FOLLOW_TILT_FROM_VELOCITY: f32 = 0.5;
pub const FOLLOW_SPIN_PER_SEC: f32 = 0.3;

// Particle field
pub const PARTICLE_COUNT: usize = 60;
pub const PARTICLE_POINTER_SCALE: f32 = 4.0;
pub const PARTICLE_REPULSION_RADIUS: f32 = 2.0;
pub const PARTICLE_REPULSION_STRENGTH: f32 = 0.1;
pub const PARTICLE_RESTORE: f32 = 0.02;
pub const PARTICLE_DRIFT: f32 = 0.002;
pub const PARTICLE_DAMPING: f32 = 0.95;
pub const PARTICLE_SPREAD: [f32; 3] = [8.0, 8.0, 4.0];
pub const PARTICLE_Z_CENTER: f32 = -2.0;

// Connection lines around the cursor follower
pub const LINE_COUNT: usize = 8;
pub const LINE_BASE_RADIUS: f32 = 3.0;
pub const LINE_WOBBLE: f32 = 0.3;
pub const LINE_TARGET_WOBBLE: f32 = 0.2;
pub const LINE_REACH: f32 = 0.3; // fraction of the way towards the pointer

// Skills orbit
pub const ORBIT_RADIUS: f32 = 2.5;
pub const ORBIT_SPEED: f32 = 0.3;
pub const ORBIT_Z_OFFSET: f32 = 2.0;
pub const ORBIT_TILT_STEP: f32 = 0.3;
pub const ORBIT_LOOK_AT: [f32; 3] = [0.0, 0.0, 5.0];
pub const ORBIT_PICK_RADIUS: f32 = 0.25;
pub const ORBIT_NODE_SIZE: f32 = 0.12;
pub const ORBIT_NODE_SIZE_HOVERED: f32 = 0.2;

// Robot mascot
pub const ROBOT_TILT_X: f32 = 0.3;
pub const ROBOT_TILT_Y: f32 = 0.4;
pub const ROBOT_PUPIL_OFFSET: [f32; 2] = [0.08, 0.05];
pub const ROBOT_HAPPY_RADIUS: f32 = 0.3;
pub const ROBOT_BLINK_INTERVAL_SEC: f32 = 2.0;
pub const ROBOT_BLINK_CHANCE: f32 = 0.3;
pub const ROBOT_BLINK_DURATION_SEC: f32 = 0.15;

// Easter egg
pub const CELEBRATION_DURATION_SEC: f64 = 10.0;
pub const HINT_DELAY_SEC: f64 = 30.0;
pub const HINT_VISIBLE_SEC: f64 = 5.0;
pub const CONFETTI_COUNT: usize = 50;

// Loading screen
pub const LOADING_MIN_DURATION_MS: f64 = 2500.0;
pub const LOADING_REVEAL_DELAY_MS: f64 = 1000.0;
pub const SCRAMBLE_TICK_MS: f64 = 50.0;
pub const SCRAMBLE_RESOLVE_PER_TICK: f32 = 0.3;
pub const SCRAMBLE_CUTOFF_PROGRESS: f32 = 70.0;
pub const RAIN_COLUMN_WIDTH: f32 = 20.0;
pub const RAIN_RESET_CHANCE: f32 = 0.025;

// Palette
pub const INDIGO: [f32; 3] = [0.388, 0.400, 0.945]; // #6366f1
pub const PURPLE: [f32; 3] = [0.659, 0.333, 0.969]; // #a855f7
pub const PINK: [f32; 3] = [0.925, 0.282, 0.600]; // #ec4899
pub const CYAN: [f32; 3] = [0.133, 0.827, 0.933]; // #22d3ee
pub const AMBER: [f32; 3] = [0.961, 0.620, 0.043]; // #f59e0b
pub const GREEN: [f32; 3] = [0.133, 0.773, 0.369]; // #22c55e
pub const RED: [f32; 3] = [0.937, 0.267, 0.267]; // #ef4444
pub const DARK_ORANGE: [f32; 3] = [0.8, 0.333, 0.0]; // #CC5500
