use crate::core::camera::Camera;
use glam::{Vec2, Vec3};
use web_sys as web;

/// CSS-pixel viewport used to normalise window pointer coordinates.
#[inline]
pub fn viewport_size(window: &web::Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w as f32, h as f32)
}

/// Pointer position in the canvas' normalised device coordinates, y up.
#[inline]
pub fn pointer_canvas_ndc(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    Some(Vec2::new((x_css / w) * 2.0 - 1.0, 1.0 - (y_css / h) * 2.0))
}

/// World-space pick ray under the pointer for a canvas with the given camera.
pub fn canvas_pick_ray(
    ev: &web::PointerEvent,
    canvas: &web::HtmlCanvasElement,
    camera_z: f32,
    fov_degrees: f32,
) -> Option<(Vec3, Vec3)> {
    let ndc = pointer_canvas_ndc(ev, canvas)?;
    let mut camera = Camera::looking_at_origin(camera_z, fov_degrees);
    camera.set_viewport(canvas.width() as f32, canvas.height() as f32);
    Some(camera.ray_from_ndc(ndc.x, ndc.y))
}
