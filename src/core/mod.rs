pub mod animate;
pub mod camera;
pub mod constants;
pub mod cursor;
pub mod loading;
pub mod orbit;
pub mod particles;
pub mod pointer;
pub mod robot;
pub mod sequence;
pub mod shader;
pub mod spring;

pub use animate::*;
pub use constants::*;
pub use pointer::*;

// Shaders bundled as string constants
pub static BACKGROUND_WGSL: &str = include_str!("../../shaders/background.wgsl");
pub static SPRITES_WGSL: &str = include_str!("../../shaders/sprites.wgsl");
