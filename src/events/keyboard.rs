use super::Listener;
use crate::core::sequence::EasterEgg;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Feed every key press to the easter egg detector.
pub fn wire_easter_egg_keys(
    window: &web::Window,
    egg: Rc<RefCell<EasterEgg>>,
    started: Instant,
) -> anyhow::Result<Listener> {
    Listener::new(window, "keydown", move |ev: web::KeyboardEvent| {
        let now = started.elapsed().as_secs_f64();
        if egg.borrow_mut().on_key(ev.code(), now) {
            log::info!("[easter] sequence matched");
        }
    })
}
