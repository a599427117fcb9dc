use glam::Vec2;

/// Latest pointer position in normalized device coordinates.
///
/// Both axes are kept in \[-1, 1\]; `y` points up, matching clip space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Distance from the viewport centre.
    #[inline]
    pub fn length(self) -> f32 {
        self.to_vec2().length()
    }
}

#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Single-writer pointer state shared with every animated component.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    sample: PointerSample,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert viewport pixel coordinates to normalized device coordinates.
    ///
    /// A degenerate viewport leaves the previous sample untouched.
    pub fn update(&mut self, px: f32, py: f32, viewport_width: f32, viewport_height: f32) {
        if !(viewport_width > 0.0 && viewport_height > 0.0) || !px.is_finite() || !py.is_finite()
        {
            return;
        }
        let x = (px / viewport_width) * 2.0 - 1.0;
        let y = -(py / viewport_height) * 2.0 + 1.0;
        self.sample = PointerSample::new(x, y);
    }

    #[inline]
    pub fn current(&self) -> PointerSample {
        self.sample
    }
}
