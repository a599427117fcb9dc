/// Page wiring and camera constants for the browser layer.
///
/// Element ids are the contract with the host page; the tuning numbers for
/// the animations themselves live in `core::constants`.
// Canvases
pub const BACKGROUND_CANVAS_ID: &str = "menu-background";
pub const CURSOR_CANVAS_ID: &str = "cursor-follower";
pub const ORBIT_CANVAS_ID: &str = "skills-orbit";
pub const ROBOT_CANVAS_ID: &str = "robot-mascot";
pub const RAIN_CANVAS_ID: &str = "loading-rain";

// Overlays
pub const LOADING_SCREEN_ID: &str = "loading-screen";
pub const LOADING_TITLE_ID: &str = "loading-title";
pub const LOADING_PROGRESS_ID: &str = "loading-progress";
pub const EASTER_EGG_ID: &str = "easter-egg";
pub const EASTER_EGG_HINT_ID: &str = "easter-egg-hint";

// Signals to the host page
pub const LOADED_EVENT: &str = "portfolio:loaded";
pub const HOVERED_SKILL_ATTR: &str = "data-hovered-skill";

// Host overrides
pub const SEED_ATTR: &str = "data-seed";
pub const SKILLS_ATTR: &str = "data-skills";
pub const MIN_DURATION_ATTR: &str = "data-min-duration";

// Cameras (eye on +Z looking at the origin, vertical fov in degrees)
pub const CURSOR_CAMERA_Z: f32 = 5.0;
pub const CURSOR_CAMERA_FOV_DEG: f32 = 50.0;
pub const ORBIT_CAMERA_Z: f32 = 6.0;
pub const ORBIT_CAMERA_FOV_DEG: f32 = 50.0;
pub const ROBOT_CAMERA_Z: f32 = 2.5;
pub const ROBOT_CAMERA_FOV_DEG: f32 = 50.0;

// Rain painting
pub const RAIN_TICK_MS: f64 = 50.0;
pub const RAIN_FADE_FILL: &str = "rgba(0, 0, 0, 0.05)";
pub const RAIN_GLYPH_FILL: &str = "#6366f130";
pub const RAIN_FONT: &str = "15px monospace";

pub const DEFAULT_SKILLS: &str = "React:#61DAFB,Node.js:#339933,TypeScript:#3178C6,\
Python:#3776AB,AWS:#FF9900,Docker:#2496ED,MongoDB:#47A248,PostgreSQL:#336791,\
Solidity:#627EEA,GraphQL:#E535AB,Next.js:#ffffff,Three.js:#049EF4";
