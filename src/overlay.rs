use crate::constants::*;
use crate::core::loading::{LoadingConfig, LoadingPhase, LoadingSequence, MatrixRain, RainGlyph};
use crate::core::sequence::{EasterEgg, EasterEggView};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Loading screen: timed progress, scrambled title and the rain canvas.
pub struct LoadingOverlay {
    sequence: LoadingSequence,
    title: Option<web::HtmlElement>,
    progress: Option<web::HtmlElement>,
    rain: Option<RainPainter>,
}

struct RainPainter {
    ctx: web::CanvasRenderingContext2d,
    canvas: web::HtmlCanvasElement,
    rain: MatrixRain,
    glyphs: Vec<RainGlyph>,
    last_tick_ms: f64,
}

impl LoadingOverlay {
    pub fn mount(document: &web::Document, config: LoadingConfig) -> anyhow::Result<Self> {
        let screen = document
            .get_element_by_id(LOADING_SCREEN_ID)
            .ok_or_else(|| anyhow::anyhow!("missing #{}", LOADING_SCREEN_ID))?;
        let seed = config.seed;
        let mut sequence = LoadingSequence::new(config);
        sequence.set_on_complete(move || {
            dom::set_hidden(&screen, true);
            let Some(window) = web::window() else {
                return;
            };
            match web::Event::new(LOADED_EVENT) {
                Ok(ev) => {
                    _ = window.dispatch_event(&ev);
                }
                Err(e) => log::warn!("[loading] could not create {}: {:?}", LOADED_EVENT, e),
            }
        });

        let rain = match RainPainter::mount(document, seed) {
            Ok(r) => Some(r),
            Err(e) => {
                log::warn!("[loading] rain disabled: {:?}", e);
                None
            }
        };

        Ok(Self {
            sequence,
            title: dom::html_by_id(document, LOADING_TITLE_ID),
            progress: dom::html_by_id(document, LOADING_PROGRESS_ID),
            rain,
        })
    }

    /// Advance to `elapsed_ms` since page start; true once the overlay is finished.
    pub fn tick(&mut self, elapsed_ms: f64) -> bool {
        let phase = self.sequence.tick(elapsed_ms);
        if let Some(title) = &self.title {
            title.set_text_content(Some(self.sequence.text()));
            if self.sequence.is_glitching() {
                _ = title.set_attribute("data-glitch", self.sequence.text());
            } else {
                _ = title.remove_attribute("data-glitch");
            }
        }
        if let Some(bar) = &self.progress {
            _ = bar
                .style()
                .set_property("width", &format!("{:.1}%", self.sequence.progress()));
        }
        if phase == LoadingPhase::Complete {
            self.rain = None;
            return true;
        }
        if let Some(rain) = &mut self.rain {
            rain.paint(elapsed_ms);
        }
        false
    }
}

impl RainPainter {
    fn mount(document: &web::Document, seed: u64) -> anyhow::Result<Self> {
        let canvas = dom::canvas_by_id(document, RAIN_CANVAS_ID)?;
        dom::sync_canvas_backing_size(&canvas);
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let rain = MatrixRain::new(canvas.width() as f32, canvas.height() as f32, seed);
        log::info!("[loading] rain columns={}", rain.columns());
        Ok(Self {
            ctx,
            canvas,
            rain,
            glyphs: Vec::new(),
            last_tick_ms: f64::NEG_INFINITY,
        })
    }

    fn paint(&mut self, elapsed_ms: f64) {
        if elapsed_ms - self.last_tick_ms < RAIN_TICK_MS {
            return;
        }
        self.last_tick_ms = elapsed_ms;
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.set_fill_style_str(RAIN_FADE_FILL);
        self.ctx.fill_rect(0.0, 0.0, w, h);
        self.ctx.set_fill_style_str(RAIN_GLYPH_FILL);
        self.ctx.set_font(RAIN_FONT);
        self.rain.step(&mut self.glyphs);
        let mut buf = [0u8; 4];
        for g in &self.glyphs {
            _ = self
                .ctx
                .fill_text(g.glyph.encode_utf8(&mut buf), g.x as f64, g.y as f64);
        }
    }
}

/// Celebration overlay, delayed hint and falling confetti.
pub struct EasterEggOverlay {
    egg: Rc<RefCell<EasterEgg>>,
    document: web::Document,
    root: Option<web::Element>,
    hint: Option<web::Element>,
    confetti: Vec<web::HtmlElement>,
    shown_trigger: u32,
    last: EasterEggView,
}

impl EasterEggOverlay {
    pub fn mount(document: &web::Document, egg: Rc<RefCell<EasterEgg>>) -> Self {
        let root = document.get_element_by_id(EASTER_EGG_ID);
        let hint = document.get_element_by_id(EASTER_EGG_HINT_ID);
        if root.is_none() {
            log::warn!("[easter] missing #{}; celebration has no overlay", EASTER_EGG_ID);
        }
        for el in [&root, &hint].into_iter().flatten() {
            dom::set_hidden(el, true);
        }
        Self {
            egg,
            document: document.clone(),
            root,
            hint,
            confetti: Vec::new(),
            shown_trigger: 0,
            last: EasterEggView::default(),
        }
    }

    /// `now` is seconds since page start.
    pub fn tick(&mut self, now: f64) {
        let view = self.egg.borrow_mut().tick(now);
        if view.celebrating != self.last.celebrating {
            if let Some(root) = &self.root {
                dom::set_hidden(root, !view.celebrating);
            }
        }
        if view.hint_visible != self.last.hint_visible {
            if let Some(hint) = &self.hint {
                dom::set_hidden(hint, !view.hint_visible);
            }
        }
        self.last = view;

        let Some(t) = view.confetti_t else {
            self.clear_confetti();
            return;
        };
        let trigger = self.egg.borrow().triggers();
        if trigger != self.shown_trigger {
            self.clear_confetti();
            self.spawn_confetti();
            self.shown_trigger = trigger;
        }
        self.place_confetti(t);
    }

    fn spawn_confetti(&mut self) {
        let Some(root) = &self.root else {
            return;
        };
        let egg = self.egg.borrow();
        let Some(burst) = egg.burst() else {
            return;
        };
        for piece in &burst.pieces {
            let Ok(el) = self.document.create_element("div") else {
                continue;
            };
            let Ok(el) = el.dyn_into::<web::HtmlElement>() else {
                continue;
            };
            let [r, g, b] = piece.color;
            let style = el.style();
            _ = style.set_property("position", "fixed");
            _ = style.set_property("top", "0");
            _ = style.set_property("left", &format!("{:.2}%", piece.left_percent));
            _ = style.set_property("width", "10px");
            _ = style.set_property("height", "10px");
            _ = style.set_property("pointer-events", "none");
            _ = style.set_property("background-color", &format!("rgb({}, {}, {})", r, g, b));
            if root.append_child(&el).is_ok() {
                self.confetti.push(el);
            }
        }
    }

    fn place_confetti(&self, t: f32) {
        let egg = self.egg.borrow();
        let Some(burst) = egg.burst() else {
            return;
        };
        let vh = web::window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        for (el, piece) in self.confetti.iter().zip(&burst.pieces) {
            let pose = piece.sample(t, vh);
            let style = el.style();
            _ = style.set_property(
                "transform",
                &format!(
                    "translate({:.1}px, {:.1}px) rotate({:.1}deg)",
                    pose.x_px, pose.y_px, pose.rotation_deg
                ),
            );
            _ = style.set_property("opacity", &format!("{:.3}", pose.opacity));
        }
    }

    fn clear_confetti(&mut self) {
        for el in self.confetti.drain(..) {
            el.remove();
        }
    }
}

impl Drop for EasterEggOverlay {
    fn drop(&mut self) {
        self.clear_confetti();
        for el in [&self.root, &self.hint].into_iter().flatten() {
            dom::set_hidden(el, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequence::KONAMI_CODE;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn dropping_easter_overlay_removes_confetti_and_hides_root() {
        let document = web::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_id(EASTER_EGG_ID);
        document.body().unwrap().append_child(&root).unwrap();

        let egg = Rc::new(RefCell::new(EasterEgg::new(5)));
        let mut overlay = EasterEggOverlay::mount(&document, egg.clone());
        for code in KONAMI_CODE {
            egg.borrow_mut().on_key(code.to_string(), 1.0);
        }
        overlay.tick(1.5);
        assert!(!root.class_list().contains("hidden"));
        assert!(root.child_element_count() > 0);

        drop(overlay);
        assert!(root.class_list().contains("hidden"));
        assert_eq!(root.child_element_count(), 0);
        root.remove();
    }
}
