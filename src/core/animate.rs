use super::pointer::PointerSample;
use super::shader::ShaderUniforms;
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

/// Per-frame input handed to every animated component.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub pointer: PointerSample,
    /// Seconds since the host loop started.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub dt: f32,
}

/// A camera-facing disc drawn by the sprite renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub position: Vec3,
    pub size: f32,
    pub color: [f32; 4],
}

impl Sprite {
    pub fn new(position: Vec3, size: f32, rgb: [f32; 3], alpha: f32) -> Self {
        Self {
            position,
            size,
            color: [rgb[0], rgb[1], rgb[2], alpha],
        }
    }
}

/// Sprites that persist across frames and are only rewritten by their owner.
#[derive(Clone, Debug, Default)]
pub struct SpriteLayer {
    pub sprites: Vec<Sprite>,
    /// Set when `sprites` changed since the last collect.
    pub dirty: bool,
}

impl SpriteLayer {
    pub fn replace(&mut self, sprites: impl IntoIterator<Item = Sprite>) {
        self.sprites.clear();
        self.sprites.extend(sprites);
        self.dirty = true;
    }
}

/// What a set of animations wants drawn this frame.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub sprites: Vec<Sprite>,
    /// Drawn before `sprites`; uploaded only when dirty.
    pub cached: SpriteLayer,
    pub background: Option<ShaderUniforms>,
}

impl Scene {
    /// Drops per-frame content; the cached layer keeps its sprites but is marked clean.
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.cached.dirty = false;
        self.background = None;
    }

    /// Emit `dots` evenly spaced sprites along a segment, endpoints included.
    pub fn push_dotted_line(&mut self, from: Vec3, to: Vec3, dots: usize, size: f32, color: [f32; 4]) {
        if dots < 2 {
            return;
        }
        for k in 0..dots {
            let t = k as f32 / (dots - 1) as f32;
            self.sprites.push(Sprite {
                position: from.lerp(to, t),
                size,
                color,
            });
        }
    }
}

/// Anything that advances with the pointer and the clock.
pub trait Animatable {
    fn step(&mut self, frame: &FrameInput);

    fn emit(&mut self, _scene: &mut Scene) {}
}

impl<T: Animatable> Animatable for Rc<RefCell<T>> {
    fn step(&mut self, frame: &FrameInput) {
        self.borrow_mut().step(frame);
    }

    fn emit(&mut self, scene: &mut Scene) {
        self.borrow_mut().emit(scene);
    }
}

/// Ordered collection stepped by the host loop without knowing concrete types.
#[derive(Default)]
pub struct AnimationSet {
    items: Vec<Box<dyn Animatable>>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: impl Animatable + 'static) {
        self.items.push(Box::new(item));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn step(&mut self, frame: &FrameInput) {
        for item in &mut self.items {
            item.step(frame);
        }
    }

    /// Clears `scene` and refills it from every item in insertion order.
    pub fn collect(&mut self, scene: &mut Scene) {
        scene.clear();
        for item in &mut self.items {
            item.emit(scene);
        }
    }
}
