use super::Listener;
use crate::constants::{ORBIT_CAMERA_FOV_DEG, ORBIT_CAMERA_Z};
use crate::core::orbit::OrbitMotion;
use crate::core::PointerTracker;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Window-wide pointer movement -> normalized shared sample.
pub fn wire_pointer_tracker(
    window: &web::Window,
    tracker: Rc<RefCell<PointerTracker>>,
) -> anyhow::Result<Listener> {
    let wnd = window.clone();
    Listener::new(window, "pointermove", move |ev: web::PointerEvent| {
        let (w, h) = input::viewport_size(&wnd);
        tracker
            .borrow_mut()
            .update(ev.client_x() as f32, ev.client_y() as f32, w, h);
    })
}

/// Canvas-local pointer rays for orbit hover; leaving the canvas clears hover.
pub fn wire_orbit_picking(
    canvas: &web::HtmlCanvasElement,
    orbit: Rc<RefCell<OrbitMotion>>,
) -> anyhow::Result<Vec<Listener>> {
    let canvas_move = canvas.clone();
    let orbit_move = orbit.clone();
    let on_move = Listener::new(canvas, "pointermove", move |ev: web::PointerEvent| {
        let ray = input::canvas_pick_ray(&ev, &canvas_move, ORBIT_CAMERA_Z, ORBIT_CAMERA_FOV_DEG);
        orbit_move.borrow_mut().set_pick_ray(ray);
    })?;
    let on_leave = Listener::new(canvas, "pointerleave", move |_ev: web::PointerEvent| {
        orbit.borrow_mut().set_pick_ray(None);
    })?;
    Ok(vec![on_move, on_leave])
}
