//! Control surface the page drives: audio lifecycle, preset selection and
//! the per-frame particle step.
//!
//! The page builds one instance at start-up; scripts reach it through
//! `currentExperience()` and the Rust glue in `session` shares the same handle.

use crate::audio::WebAudioBackend;
use crate::canvas::CanvasPainter;
use crate::dom;
use glam::Vec2;
use moodscape_core::{
    all_assets, AudioEngine, AudioStartup, BinauralMode, FrameDriver, ParticleEngine, PresetKey,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;
use web_sys as web;

#[wasm_bindgen]
#[derive(Clone)]
pub struct Experience {
    audio: Rc<RefCell<AudioEngine<WebAudioBackend>>>,
    startup: AudioStartup<WebAudioBackend>,
    particles: Rc<RefCell<ParticleEngine>>,
    painter: Rc<RefCell<CanvasPainter>>,
    canvas: web::HtmlCanvasElement,
    driver: Rc<Cell<FrameDriver>>,
}

thread_local! {
    static CURRENT: RefCell<Option<Experience>> = const { RefCell::new(None) };
}

/// The instance the page created at start-up, once it exists.
#[wasm_bindgen(js_name = currentExperience)]
pub fn current_experience() -> Option<Experience> {
    CURRENT.with(|c| c.borrow().clone())
}

#[wasm_bindgen]
impl Experience {
    /// Create the audio context, decode every asset and build the graph.
    /// Concurrent calls share one load and all resolve once it is done;
    /// failures are logged, never rejected.
    #[wasm_bindgen(js_name = initializeAudio)]
    pub fn initialize_audio_js(&self) -> js_sys::Promise {
        let this = self.clone();
        future_to_promise(async move {
            this.initialize_audio().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = playAudio)]
    pub fn play_audio(&self, preset_key: &str, binaural_mode: &str) {
        match preset_key.parse::<PresetKey>() {
            Ok(preset) => self.play(preset, BinauralMode::from_key(binaural_mode)),
            Err(e) => log::warn!("[audio] {}", e),
        }
    }

    /// Fade the master bus out and release the voice once the fade is done.
    #[wasm_bindgen(js_name = stopAudio)]
    pub fn stop_audio(&self) {
        if !self.audio.borrow_mut().stop() {
            return;
        }
        let fade_ms = (self.audio.borrow().params().fade_out_sec * 1000.0) as i32;
        let audio = self.audio.clone();
        _ = dom::set_timeout(fade_ms, move || audio.borrow_mut().finish_stop());
    }

    #[wasm_bindgen(js_name = setActivePreset)]
    pub fn set_active_preset(&self, preset_key: &str) {
        match preset_key.parse::<PresetKey>() {
            Ok(preset) => self.select(preset),
            Err(e) => log::warn!("[particles] {}", e),
        }
    }

    #[wasm_bindgen(js_name = activePreset)]
    pub fn active_preset(&self) -> String {
        self.current_preset().as_str().to_string()
    }

    /// Step the particle system once. `x`/`y` are CSS pixels on the canvas.
    /// The first call stops the built-in animation loop from stepping.
    #[wasm_bindgen(js_name = onFrame)]
    pub fn on_frame(&self, pointer_active: bool, x: f32, y: f32) {
        self.step(FrameDriver::External, pointer_active.then(|| Vec2::new(x, y)));
    }

    /// New viewport in CSS pixels. Live particles are kept as they are.
    pub fn resize(&self, width: f32, height: f32) {
        let dpr = dom::set_canvas_backing_size(&self.canvas, width, height);
        self.painter.borrow().set_pixel_ratio(dpr);
        self.particles.borrow_mut().resize(width, height);
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.audio.borrow().is_playing()
    }
}

impl Experience {
    pub fn from_canvas(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let painter = CanvasPainter::from_canvas(canvas)?;
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let audio = Rc::new(RefCell::new(AudioEngine::default()));
        let experience = Self {
            startup: AudioStartup::new(audio.clone()),
            audio,
            particles: Rc::new(RefCell::new(ParticleEngine::new(seed))),
            painter: Rc::new(RefCell::new(painter)),
            canvas: canvas.clone(),
            driver: Rc::new(Cell::new(FrameDriver::Internal)),
        };
        experience.fit_to_layout();
        Ok(experience)
    }

    /// Make this the instance returned by `currentExperience()`.
    pub fn install(&self) {
        CURRENT.with(|c| *c.borrow_mut() = Some(self.clone()));
    }

    /// Resize to the canvas' current CSS box.
    pub fn fit_to_layout(&self) {
        let rect = self.canvas.get_bounding_client_rect();
        self.resize(rect.width() as f32, rect.height() as f32);
    }

    pub async fn initialize_audio(&self) {
        let load = self.startup.initialize(WebAudioBackend::new, all_assets());
        if let Err(e) = load.await {
            log::error!("[audio] error initializing audio: {}", e);
        }
    }

    pub fn play(&self, preset: PresetKey, mode: BinauralMode) {
        if let Err(e) = self.audio.borrow_mut().play(preset, mode) {
            log::error!("[audio] {}", e);
        }
    }

    pub fn select(&self, preset: PresetKey) {
        self.particles.borrow_mut().set_active_preset(preset);
    }

    pub fn current_preset(&self) -> PresetKey {
        self.particles.borrow().active_preset()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.borrow().particles().len()
    }

    /// Step once on behalf of `source`, unless a script has taken over
    /// stepping from the built-in loop.
    pub fn step(&self, source: FrameDriver, pointer: Option<Vec2>) -> bool {
        let mut driver = self.driver.get();
        let accepted = driver.accept(source);
        self.driver.set(driver);
        if accepted {
            let mut painter = self.painter.borrow_mut();
            self.particles.borrow_mut().on_frame(pointer, &mut *painter);
        }
        accepted
    }
}
