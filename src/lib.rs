#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::core::camera::Camera;
use crate::core::cursor::{ConnectionLines, CursorFollower};
use crate::core::loading::LoadingConfig;
use crate::core::orbit::{parse_skill_list, OrbitConfig, OrbitMotion};
use crate::core::particles::{ParticleConfig, ParticleField};
use crate::core::robot::RobotHead;
use crate::core::sequence::EasterEgg;
use crate::core::shader::{BackgroundConfig, BackgroundField};
use crate::core::spring::SpringFollower;
use crate::core::{AnimationSet, PointerTracker, Scene};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
pub mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

struct Mounted {
    frame_loop: frame::FrameLoop,
    frame_ctx: Rc<RefCell<frame::FrameContext>>,
    listeners: Vec<events::Listener>,
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("portfolio-fx starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop the animation loop, detach every listener and clear the easter-egg overlay.
#[wasm_bindgen]
pub fn teardown() {
    let mounted = MOUNTED.with(|m| m.borrow_mut().take());
    if let Some(mounted) = mounted {
        mounted.frame_loop.stop();
        log::info!("portfolio-fx torn down");
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let seed = dom::body_data(&document, SEED_ATTR)
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or_else(|| js_sys::Date::now() as u64);
    let started = Instant::now();
    log::info!("[init] seed={}", seed);

    let pointer = Rc::new(RefCell::new(PointerTracker::new()));
    let mut listeners = vec![events::wire_pointer_tracker(&window, pointer.clone())?];

    // Loading screen first so it covers the page while GPU stages come up.
    let loading = match overlay::LoadingOverlay::mount(&document, loading_config(&document, seed)) {
        Ok(l) => Some(l),
        Err(e) => {
            log::warn!("[loading] skipped: {:?}", e);
            None
        }
    };

    let egg = Rc::new(RefCell::new(EasterEgg::new(seed)));
    listeners.push(events::wire_easter_egg_keys(&window, egg.clone(), started)?);
    let easter = Some(overlay::EasterEggOverlay::mount(&document, egg));

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        pointer,
        stages: Vec::new(),
        loading,
        easter,
        started,
        last_instant: Instant::now(),
    }));
    listeners.push(wire_canvas_resize(&window, frame_ctx.clone())?);
    let frame_loop = frame::start_loop(frame_ctx.clone());

    // A second init replaces the first; its loop must not keep running.
    teardown();
    MOUNTED.with(|m| {
        *m.borrow_mut() = Some(Mounted {
            frame_loop,
            frame_ctx: frame_ctx.clone(),
            listeners,
        })
    });

    // Overlays are already animating; stages join the loop as they come up.
    let gpu = render::Gpu::new().await?;
    if !is_current(&frame_ctx) {
        log::info!("[init] superseded before GPU stages mounted");
        return Ok(());
    }
    let mut stage_listeners = Vec::new();
    push_stage(&frame_ctx, BACKGROUND_CANVAS_ID, mount_background(&document, &gpu));
    push_stage(&frame_ctx, CURSOR_CANVAS_ID, mount_cursor(&document, &gpu, seed));
    push_stage(
        &frame_ctx,
        ORBIT_CANVAS_ID,
        mount_orbit(&document, &gpu, &mut stage_listeners),
    );
    push_stage(&frame_ctx, ROBOT_CANVAS_ID, mount_robot(&document, &gpu, seed));
    log::info!("[init] {} stage(s) mounted", frame_ctx.borrow().stages.len());

    MOUNTED.with(|m| {
        if let Some(mounted) = m.borrow_mut().as_mut() {
            mounted.listeners.extend(stage_listeners);
        }
    });
    Ok(())
}

fn is_current(frame_ctx: &Rc<RefCell<frame::FrameContext>>) -> bool {
    MOUNTED.with(|m| {
        m.borrow()
            .as_ref()
            .is_some_and(|mounted| Rc::ptr_eq(&mounted.frame_ctx, frame_ctx))
    })
}

fn push_stage(
    frame_ctx: &RefCell<frame::FrameContext>,
    id: &str,
    stage: anyhow::Result<frame::Stage>,
) {
    match stage {
        Ok(s) => {
            log::info!("[init] #{} mounted", s.name);
            frame_ctx.borrow_mut().stages.push(s);
        }
        Err(e) => log::warn!("[init] #{} skipped: {:?}", id, e),
    }
}

fn loading_config(document: &web::Document, seed: u64) -> LoadingConfig {
    let mut config = LoadingConfig {
        seed,
        ..LoadingConfig::default()
    };
    let min_duration = dom::body_data(document, MIN_DURATION_ATTR)
        .and_then(|s| s.trim().parse::<f64>().ok());
    if let Some(ms) = min_duration {
        if ms.is_finite() && ms >= 0.0 {
            config.min_duration_ms = ms;
        }
    }
    config
}

fn wire_canvas_resize(
    window: &web::Window,
    frame_ctx: Rc<RefCell<frame::FrameContext>>,
) -> anyhow::Result<events::Listener> {
    events::Listener::new(window, "resize", move |_ev: web::Event| {
        for stage in &frame_ctx.borrow().stages {
            dom::sync_canvas_backing_size(&stage.canvas);
        }
    })
}

fn stage_canvas(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = dom::canvas_by_id(document, id)?;
    dom::sync_canvas_backing_size(&canvas);
    Ok(canvas)
}

fn mount_background(document: &web::Document, gpu: &Rc<render::Gpu>) -> anyhow::Result<frame::Stage> {
    let canvas = stage_canvas(document, BACKGROUND_CANVAS_ID)?;
    let renderer = render::StageRenderer::background(gpu.clone(), &canvas)?;
    let mut animations = AnimationSet::new();
    animations.push(BackgroundField::new(&BackgroundConfig::default()));
    Ok(frame::Stage {
        name: BACKGROUND_CANVAS_ID,
        canvas,
        animations,
        scene: Scene::default(),
        renderer,
    })
}

fn mount_cursor(
    document: &web::Document,
    gpu: &Rc<render::Gpu>,
    seed: u64,
) -> anyhow::Result<frame::Stage> {
    let canvas = stage_canvas(document, CURSOR_CANVAS_ID)?;
    let camera = Camera::looking_at_origin(CURSOR_CAMERA_Z, CURSOR_CAMERA_FOV_DEG);
    let renderer = render::StageRenderer::sprites(gpu.clone(), &canvas, camera)?;
    let mut animations = AnimationSet::new();
    animations.push(ParticleField::new(ParticleConfig {
        seed,
        ..ParticleConfig::default()
    }));
    animations.push(ConnectionLines::default());
    animations.push(CursorFollower::default());
    Ok(frame::Stage {
        name: CURSOR_CANVAS_ID,
        canvas,
        animations,
        scene: Scene::default(),
        renderer,
    })
}

fn mount_orbit(
    document: &web::Document,
    gpu: &Rc<render::Gpu>,
    listeners: &mut Vec<events::Listener>,
) -> anyhow::Result<frame::Stage> {
    let canvas = stage_canvas(document, ORBIT_CANVAS_ID)?;
    let skills = canvas
        .get_attribute(SKILLS_ATTR)
        .or_else(|| dom::body_data(document, SKILLS_ATTR))
        .unwrap_or_else(|| DEFAULT_SKILLS.to_string());
    let items = parse_skill_list(&skills);
    log::info!("[orbit] {} skill(s)", items.len());

    let camera = Camera::looking_at_origin(ORBIT_CAMERA_Z, ORBIT_CAMERA_FOV_DEG);
    let renderer = render::StageRenderer::sprites(gpu.clone(), &canvas, camera)?;

    let orbit = Rc::new(RefCell::new(OrbitMotion::new(OrbitConfig::default(), items)));
    let canvas_hover = canvas.clone();
    orbit.borrow_mut().set_on_hover(move |item| {
        _ = match item {
            Some(it) => canvas_hover.set_attribute(HOVERED_SKILL_ATTR, &it.label),
            None => canvas_hover.remove_attribute(HOVERED_SKILL_ATTR),
        };
    });
    listeners.extend(events::wire_orbit_picking(&canvas, orbit.clone())?);

    let mut animations = AnimationSet::new();
    animations.push(orbit);
    Ok(frame::Stage {
        name: ORBIT_CANVAS_ID,
        canvas,
        animations,
        scene: Scene::default(),
        renderer,
    })
}

fn mount_robot(
    document: &web::Document,
    gpu: &Rc<render::Gpu>,
    seed: u64,
) -> anyhow::Result<frame::Stage> {
    let canvas = stage_canvas(document, ROBOT_CANVAS_ID)?;
    let camera = Camera::looking_at_origin(ROBOT_CAMERA_Z, ROBOT_CAMERA_FOV_DEG);
    let renderer = render::StageRenderer::sprites(gpu.clone(), &canvas, camera)?;
    let mut animations = AnimationSet::new();
    animations.push(RobotHead::new(SpringFollower::default(), seed));
    Ok(frame::Stage {
        name: ROBOT_CANVAS_ID,
        canvas,
        animations,
        scene: Scene::default(),
        renderer,
    })
}
