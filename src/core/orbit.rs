use super::animate::{Animatable, FrameInput, Scene, Sprite};
use super::camera::ray_sphere;
use super::constants::*;
use glam::{Quat, Vec3};
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitItem {
    pub label: String,
    pub color: [f32; 3],
    pub angular_phase: f32,
    pub orbit_plane_tilt: f32,
}

impl OrbitItem {
    pub fn new(label: impl Into<String>, color: [f32; 3], index: usize, total: usize) -> Self {
        Self {
            label: label.into(),
            color,
            angular_phase: phase_for(index, total),
            orbit_plane_tilt: tilt_for(index),
        }
    }
}

#[inline]
fn phase_for(index: usize, total: usize) -> f32 {
    if total == 0 {
        return 0.0;
    }
    (index as f32 / total as f32) * TAU
}

#[inline]
fn tilt_for(index: usize) -> f32 {
    (index % 3) as f32 * ORBIT_TILT_STEP
}

/// Position of item `index` of `total` on its tilted circular path.
pub fn orbit_position(
    index: usize,
    total: usize,
    elapsed: f32,
    speed: f32,
    radius: f32,
    z_offset: f32,
) -> Vec3 {
    let angle = phase_for(index, total) + elapsed * speed;
    point_on_orbit(angle, tilt_for(index), radius, z_offset)
}

#[inline]
fn point_on_orbit(angle: f32, tilt: f32, radius: f32, z_offset: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(
        c * radius,
        s * radius * tilt.cos(),
        s * radius * tilt.sin() - z_offset,
    )
}

#[derive(Clone, Debug)]
pub struct OrbitConfig {
    pub radius: f32,
    pub speed: f32,
    pub z_offset: f32,
    pub look_at: Vec3,
    pub pick_radius: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: ORBIT_RADIUS,
            speed: ORBIT_SPEED,
            z_offset: ORBIT_Z_OFFSET,
            look_at: Vec3::from_array(ORBIT_LOOK_AT),
            pick_radius: ORBIT_PICK_RADIUS,
        }
    }
}

type HoverCallback = Box<dyn FnMut(Option<&OrbitItem>)>;

/// Skills orbiting a central core, with pointer hover selection.
pub struct OrbitMotion {
    config: OrbitConfig,
    items: Vec<OrbitItem>,
    elapsed: f32,
    hovered: Option<usize>,
    pick_ray: Option<(Vec3, Vec3)>,
    on_hover: Option<HoverCallback>,
    line_buffer: Vec<f32>,
}

impl OrbitMotion {
    pub fn new(config: OrbitConfig, items: Vec<OrbitItem>) -> Self {
        let line_buffer = vec![0.0; items.len() * 6];
        Self {
            config,
            items,
            elapsed: 0.0,
            hovered: None,
            pick_ray: None,
            on_hover: None,
            line_buffer,
        }
    }

    pub fn items(&self) -> &[OrbitItem] {
        &self.items
    }

    pub fn hovered(&self) -> Option<&OrbitItem> {
        self.hovered.and_then(|i| self.items.get(i))
    }

    pub fn set_on_hover(&mut self, callback: impl FnMut(Option<&OrbitItem>) + 'static) {
        self.on_hover = Some(Box::new(callback));
    }

    /// Ray used to resolve hover on the next step; `None` when the pointer left.
    pub fn set_pick_ray(&mut self, ray: Option<(Vec3, Vec3)>) {
        self.pick_ray = ray;
    }

    /// World position of item `index`, or `None` past the end of the list.
    pub fn position(&self, index: usize, elapsed: f32) -> Option<Vec3> {
        self.items
            .get(index)
            .map(|item| self.item_position(item, elapsed))
    }

    fn item_position(&self, item: &OrbitItem, elapsed: f32) -> Vec3 {
        let angle = item.angular_phase + elapsed * self.config.speed;
        point_on_orbit(
            angle,
            item.orbit_plane_tilt,
            self.config.radius,
            self.config.z_offset,
        )
    }

    /// Rotation that turns the item's +Z axis towards the look-at point.
    ///
    /// Nodes are drawn as camera-facing billboards, so the renderer ignores this.
    pub fn orientation(&self, index: usize, elapsed: f32) -> Option<Quat> {
        let pos = self.position(index, elapsed)?;
        let dir = (self.config.look_at - pos).normalize_or_zero();
        if dir == Vec3::ZERO {
            return Some(Quat::IDENTITY);
        }
        Some(Quat::from_rotation_arc(Vec3::Z, dir))
    }

    /// Centre-to-item segments, six floats per item.
    pub fn connection_lines(&self) -> &[f32] {
        &self.line_buffer
    }

    /// Index of the nearest item hit by the ray at `elapsed`.
    pub fn pick(&self, ray_origin: Vec3, ray_dir: Vec3, elapsed: f32) -> Option<usize> {
        let mut best = None::<(usize, f32)>;
        for (i, item) in self.items.iter().enumerate() {
            let center = self.item_position(item, elapsed);
            if let Some(t) = ray_sphere(ray_origin, ray_dir, center, self.config.pick_radius) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((i, t)),
                }
            }
        }
        best.map(|(i, _)| i)
    }

    /// Record the hovered item; fires the callback only when it changes.
    pub fn update_hover(&mut self, hit: Option<usize>) -> bool {
        let hit = hit.filter(|&i| i < self.items.len());
        if hit == self.hovered {
            return false;
        }
        self.hovered = hit;
        if let Some(i) = hit {
            log::debug!("[orbit] hover {}", self.items[i].label);
        }
        if let Some(cb) = self.on_hover.as_mut() {
            cb(hit.map(|i| &self.items[i]));
        }
        true
    }

    fn refresh_lines(&mut self) {
        let elapsed = self.elapsed;
        for i in 0..self.items.len() {
            let p = self.item_position(&self.items[i], elapsed);
            let i6 = i * 6;
            self.line_buffer[i6..i6 + 3].copy_from_slice(&[0.0, 0.0, 0.0]);
            self.line_buffer[i6 + 3..i6 + 6].copy_from_slice(&p.to_array());
        }
    }
}

impl Animatable for OrbitMotion {
    fn step(&mut self, frame: &FrameInput) {
        self.elapsed = frame.elapsed;
        self.refresh_lines();
        let hit = self
            .pick_ray
            .and_then(|(ro, rd)| self.pick(ro, rd, self.elapsed));
        self.update_hover(hit);
    }

    fn emit(&mut self, scene: &mut Scene) {
        let core_rgb = self.hovered().map(|it| it.color).unwrap_or(INDIGO);
        let glow_rgb = self.hovered().map(|it| it.color).unwrap_or(PURPLE);
        let bob = (self.elapsed * 1.5).sin() * 0.05;
        scene.sprites.push(Sprite::new(Vec3::new(0.0, bob, 0.0), 1.0, core_rgb, 0.95));
        scene.sprites.push(Sprite::new(Vec3::new(0.0, bob, 0.05), 0.6, glow_rgb, 0.5));

        let line_color = [INDIGO[0], INDIGO[1], INDIGO[2], 0.25];
        for seg in self.line_buffer.chunks_exact(6) {
            let from = Vec3::new(seg[0], seg[1], seg[2]);
            let to = Vec3::new(seg[3], seg[4], seg[5]);
            scene.push_dotted_line(from, to, 10, 0.03, line_color);
        }

        for (i, item) in self.items.iter().enumerate() {
            let hovered = self.hovered == Some(i);
            let size = if hovered {
                ORBIT_NODE_SIZE_HOVERED
            } else {
                ORBIT_NODE_SIZE
            };
            let pos = self.item_position(item, self.elapsed);
            scene.sprites.push(Sprite::new(pos, size * 2.0, item.color, 1.0));
            if hovered {
                scene.sprites.push(Sprite::new(pos, size * 4.0, item.color, 0.35));
            }
        }
    }
}

/// Parse `#RRGGBB` (or `RRGGBB`) into linear-ish 0..1 RGB.
pub fn parse_hex_rgb(hex: &str) -> Option<[f32; 3]> {
    let h = hex.trim().trim_start_matches('#');
    if h.len() != 6 || !h.is_ascii() {
        return None;
    }
    let channel = |k: usize| u8::from_str_radix(&h[k..k + 2], 16).ok();
    Some([
        channel(0)? as f32 / 255.0,
        channel(2)? as f32 / 255.0,
        channel(4)? as f32 / 255.0,
    ])
}

/// Build orbit items from `"Label:#RRGGBB,Label:#RRGGBB"`.
///
/// Malformed entries are skipped; phases are assigned over the kept entries.
pub fn parse_skill_list(list: &str) -> Vec<OrbitItem> {
    let parsed: Vec<(String, [f32; 3])> = list
        .split(',')
        .filter(|e| !e.trim().is_empty())
        .filter_map(|entry| {
            let (label, color) = entry.rsplit_once(':')?;
            let label = label.trim();
            match parse_hex_rgb(color) {
                Some(rgb) if !label.is_empty() => Some((label.to_string(), rgb)),
                _ => {
                    log::warn!("[orbit] skipping malformed skill entry {:?}", entry);
                    None
                }
            }
        })
        .collect();
    let total = parsed.len();
    parsed
        .into_iter()
        .enumerate()
        .map(|(i, (label, rgb))| OrbitItem::new(label, rgb, i, total))
        .collect()
}
