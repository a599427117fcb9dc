use super::animate::{Animatable, FrameInput, Scene};
use super::constants::DARK_ORANGE;
use glam::Vec2;

pub const MAX_COLORS: usize = 8;

/// Uniform block of `background.wgsl`.
///
/// Field order and widths follow WGSL uniform layout rules: every `vec2`
/// sits on an 8-byte boundary and the palette starts at offset 64.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShaderUniforms {
    pub canvas: [f32; 2],
    pub time: f32,
    pub speed: f32,
    pub rot: [f32; 2],
    pub color_count: i32,
    pub transparent: i32,
    pub scale: f32,
    pub frequency: f32,
    pub warp_strength: f32,
    pub mouse_influence: f32,
    pub pointer: [f32; 2],
    pub parallax: f32,
    pub noise: f32,
    pub colors: [[f32; 4]; MAX_COLORS],
}

#[derive(Clone, Debug)]
pub struct BackgroundConfig {
    pub speed: f32,
    pub rotation_degrees: f32,
    pub palette: Vec<[f32; 3]>,
    pub transparent: bool,
    pub scale: f32,
    pub frequency: f32,
    pub warp_strength: f32,
    pub mouse_influence: f32,
    pub parallax: f32,
    pub noise: f32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            speed: 0.3,
            rotation_degrees: 60.0,
            palette: vec![DARK_ORANGE],
            transparent: true,
            scale: 1.2,
            frequency: 1.4,
            warp_strength: 1.2,
            mouse_influence: 0.8,
            parallax: 0.6,
            noise: 0.08,
        }
    }
}

impl BackgroundConfig {
    pub fn to_uniforms(&self) -> ShaderUniforms {
        if self.palette.len() > MAX_COLORS {
            log::warn!(
                "[background] palette has {} colors; only the first {} are used",
                self.palette.len(),
                MAX_COLORS
            );
        }
        let mut colors = [[0.0; 4]; MAX_COLORS];
        let count = self.palette.len().min(MAX_COLORS);
        for (dst, rgb) in colors.iter_mut().zip(&self.palette) {
            *dst = [rgb[0], rgb[1], rgb[2], 1.0];
        }
        let (s, c) = self.rotation_degrees.to_radians().sin_cos();
        ShaderUniforms {
            canvas: [1.0, 1.0],
            time: 0.0,
            speed: self.speed,
            rot: [c, s],
            color_count: count as i32,
            transparent: self.transparent as i32,
            scale: self.scale,
            frequency: self.frequency,
            warp_strength: self.warp_strength,
            mouse_influence: self.mouse_influence,
            pointer: [0.0, 0.0],
            parallax: self.parallax,
            noise: self.noise,
            colors,
        }
    }
}

/// Swirling procedural background; the GPU evaluates `background.wgsl`
/// with these uniforms every frame.
pub struct BackgroundField {
    uniforms: ShaderUniforms,
}

impl BackgroundField {
    pub fn new(config: &BackgroundConfig) -> Self {
        Self {
            uniforms: config.to_uniforms(),
        }
    }

    pub fn uniforms(&self) -> &ShaderUniforms {
        &self.uniforms
    }
}

impl Animatable for BackgroundField {
    fn step(&mut self, frame: &FrameInput) {
        self.uniforms.time = frame.elapsed;
        self.uniforms.pointer = [frame.pointer.x, frame.pointer.y];
    }

    fn emit(&mut self, scene: &mut Scene) {
        scene.background = Some(self.uniforms);
    }
}

/// Distance field value to pattern intensity; decreasing in `m`, in \[0, 1).
#[inline]
pub fn intensity(m: f32) -> f32 {
    1.0 - (-6.0 / (6.0 * m).exp()).exp()
}

#[inline]
fn vsin(v: Vec2) -> Vec2 {
    Vec2::new(v.x.sin(), v.y.sin())
}

#[inline]
fn vcos(v: Vec2) -> Vec2 {
    Vec2::new(v.x.cos(), v.y.cos())
}

#[inline]
fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Warped periodic distance field for one palette layer.
fn layer_distance(s: Vec2, layer: f32, t: f32, u: &ShaderUniforms) -> f32 {
    let f = u.frequency;
    let r = vsin(1.5 * (Vec2::new(s.y, s.x) * f) + 2.0 * vcos(s * f));
    let m0 = (r + Vec2::splat((5.0 * r.y * f - 3.0 * t + layer).sin() / 4.0)).length();
    let k_below = u.warp_strength.clamp(0.0, 1.0);
    let k_mix = k_below.powf(0.3);
    let gain = 1.0 + (u.warp_strength - 1.0).max(0.0);
    let disp = (r - s) * k_below;
    let warped = s + disp * gain;
    let m1 = (warped + Vec2::splat((5.0 * warped.y * f - 3.0 * t + layer).sin() / 4.0)).length();
    m0 + (m1 - m0) * k_mix
}

/// Hash noise in \[0, 1) used for dithering.
#[inline]
pub fn dither_hash(frag_coord: Vec2, time: f32) -> f32 {
    let p = frag_coord + Vec2::splat(time);
    fract((p.dot(Vec2::new(12.9898, 78.233))).sin() * 43758.547)
}

/// CPU reference of the fragment program, returning premultiplied RGBA.
///
/// `uv` is in \[0, 1\]² with y up; `frag_coord` is the pixel centre.
pub fn shade(uv: Vec2, frag_coord: Vec2, u: &ShaderUniforms) -> [f32; 4] {
    let t = u.time * u.speed;
    let pointer = Vec2::from_array(u.pointer);
    let mut p = uv * 2.0 - Vec2::ONE;
    p += pointer * u.parallax * 0.1;
    let rp = Vec2::new(
        p.x * u.rot[0] - p.y * u.rot[1],
        p.x * u.rot[1] + p.y * u.rot[0],
    );
    let aspect = u.canvas[0] / u.canvas[1].max(1.0);
    let mut q = Vec2::new(rp.x * aspect, rp.y);
    q /= u.scale.max(0.0001);
    q /= 0.5 + 0.2 * q.dot(q);
    q += Vec2::splat(0.2 * t.cos() - 7.56);
    q += (pointer - rp) * u.mouse_influence * 0.2;

    let mut col = [0.0f32; 3];
    let alpha;
    let count = (u.color_count.max(0) as usize).min(MAX_COLORS);
    let mut s = q;
    if count > 0 {
        let mut cover = 0.0f32;
        for (i, c) in u.colors.iter().take(count).enumerate() {
            s -= Vec2::splat(0.01);
            let w = intensity(layer_distance(s, i as f32, t, u));
            for k in 0..3 {
                col[k] += c[k] * w;
            }
            cover = cover.max(w);
        }
        for v in &mut col {
            *v = v.clamp(0.0, 1.0);
        }
        alpha = if u.transparent > 0 { cover } else { 1.0 };
    } else {
        for (k, v) in col.iter_mut().enumerate() {
            s -= Vec2::splat(0.01);
            *v = intensity(layer_distance(s, k as f32, t, u));
        }
        alpha = if u.transparent > 0 {
            col[0].max(col[1]).max(col[2])
        } else {
            1.0
        };
    }

    if u.noise > 0.0001 {
        let n = dither_hash(frag_coord, u.time);
        for v in &mut col {
            *v = (*v + (n - 0.5) * u.noise).clamp(0.0, 1.0);
        }
    }

    let premul = if u.transparent > 0 { alpha } else { 1.0 };
    [col[0] * premul, col[1] * premul, col[2] * premul, alpha]
}
