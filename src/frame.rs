use crate::core::{AnimationSet, FrameInput, PointerTracker, Scene};
use crate::overlay::{EasterEggOverlay, LoadingOverlay};
use crate::render::StageRenderer;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Tab switches hand us one huge delta; cap it so rotations don't jump.
const MAX_FRAME_DT_SEC: f32 = 0.1;

/// One canvas: what moves on it and how it is drawn.
pub struct Stage {
    pub name: &'static str,
    pub canvas: web::HtmlCanvasElement,
    pub animations: AnimationSet,
    pub scene: Scene,
    pub renderer: StageRenderer,
}

impl Stage {
    fn frame(&mut self, input: &FrameInput) {
        self.animations.step(input);
        self.animations.collect(&mut self.scene);
        self.renderer
            .render(&self.scene, self.canvas.width(), self.canvas.height());
    }
}

pub struct FrameContext {
    pub pointer: Rc<RefCell<PointerTracker>>,
    pub stages: Vec<Stage>,
    pub loading: Option<LoadingOverlay>,
    pub easter: Option<EasterEggOverlay>,
    pub started: Instant,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        let since_start = now - self.started;

        // Every stage sees the same pointer sample this frame.
        let input = FrameInput {
            pointer: self.pointer.borrow().current(),
            elapsed: since_start.as_secs_f32(),
            dt,
        };
        for stage in &mut self.stages {
            stage.frame(&input);
        }

        if let Some(loading) = &mut self.loading {
            if loading.tick(since_start.as_secs_f64() * 1000.0) {
                self.loading = None;
            }
        }
        if let Some(easter) = &mut self.easter {
            easter.tick(since_start.as_secs_f64());
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running `requestAnimationFrame` loop.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Tick,
}

impl FrameLoop {
    pub fn stop(&self) {
        self.running.set(false);
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // Breaks the closure's self-reference so the context is freed.
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &Tick, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => raf_id.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: Tick = Rc::new(RefCell::new(None));
    let running = Rc::new(Cell::new(true));
    let raf_id = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let running_tick = running.clone();
    let raf_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_tick.set(None);
        if !running_tick.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &raf_tick);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);

    FrameLoop {
        running,
        raf_id,
        tick,
    }
}
